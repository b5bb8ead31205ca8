pub mod describe;
mod file_loader;
mod main_menu;
mod time_slider;

pub use file_loader::FileLoader;
pub use main_menu::MainMenu;
pub use time_slider::TimeSlider;
