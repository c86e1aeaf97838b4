pub mod history;
pub mod scrape;
pub mod site;
