pub mod settings_panel;
