pub mod palette;
pub mod render;
pub mod view;

pub use palette::Palette;
pub use render::render_form;
pub use view::FormView;
