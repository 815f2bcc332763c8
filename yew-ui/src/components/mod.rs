pub mod app;
pub mod header;
pub mod paraphrase_form;
pub mod result_card;
pub mod results_list;

pub use app::App;
pub use header::Header;
pub use paraphrase_form::ParaphraseForm;
pub use result_card::ResultCard;
pub use results_list::ResultsList;
