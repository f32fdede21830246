pub mod options_page;
pub mod plugin_store;
