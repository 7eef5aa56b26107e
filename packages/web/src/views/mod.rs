mod home;
pub use home::Home;

mod language_select;
pub use language_select::LanguageSelect;

mod milk;
pub use milk::MilkCounter;
