//! Configuration section definitions.
//!
//! | Section  | Purpose                                         |
//! |----------|-------------------------------------------------|
//! | `[css]`  | Stylesheet aliases, dependencies, bundle dir    |
//! | `[js]`   | Script aliases, dependencies, bundle dir        |
//! | `[img]`  | Image aliases                                   |

mod image;
mod kind;

pub use image::ImageSection;
pub use kind::{Dependencies, KindSection};
