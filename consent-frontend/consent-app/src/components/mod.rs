pub mod consent_checkbox;
