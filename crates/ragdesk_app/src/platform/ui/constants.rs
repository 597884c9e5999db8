pub const BANNER: &str = "ragdesk: ask questions about your knowledge base (:help for commands)";
pub const QUESTION_LABEL: &str = "Your question:";
pub const ANSWER_LABEL: &str = "Answer:";
pub const SOURCES_LABEL: &str = "Sources:";
pub const RULE: &str = "--------------------------------------------------------------------------------";

pub const HELP: &str = "\
Type a question and press Enter to ask it.

  :again              ask the current question again
  :files <path>...    select files to upload (no paths clears the selection)
  :upload             upload the selected files
  :url <address>      add a URL to the pending list
  :urls               show the pending URL list
  :clear-urls         empty the pending URL list
  :process            ingest the pending URLs
  :status             show selection, pending URLs and the last ingestion status
  :help               show this help
  :quit               leave";

pub const STILL_ANSWERING: &str = "Still answering; use :again once the answer arrives";
pub const NO_QUESTION: &str = "Type a question first";
pub const INGESTION_BUSY: &str = "Ingestion in progress; wait for it to finish";
pub const NO_FILES_SELECTED: &str = "No files selected; use :files <paths...>";
pub const NO_URLS_PENDING: &str = "No URLs pending; use :url <address>";
