/// Presentational widget builders
///
/// Each submodule builds one part of a screen from borrowed state and
/// returns an `Element`; no state lives here.

pub mod carousel;
pub mod form;
pub mod grid;
pub mod orders;
pub mod pager;
pub mod templates;

use iced::Color;

pub(crate) const ACCENT: Color = Color {
    r: 0.33,
    g: 0.55,
    b: 0.98,
    a: 1.0,
};

pub(crate) const DANGER: Color = Color {
    r: 0.90,
    g: 0.30,
    b: 0.30,
    a: 1.0,
};

pub(crate) const SUCCESS: Color = Color {
    r: 0.30,
    g: 0.78,
    b: 0.45,
    a: 1.0,
};

pub(crate) const WARNING: Color = Color {
    r: 0.92,
    g: 0.78,
    b: 0.25,
    a: 1.0,
};

pub(crate) const MUTED: Color = Color {
    r: 0.62,
    g: 0.62,
    b: 0.66,
    a: 1.0,
};
