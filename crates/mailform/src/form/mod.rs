//! The form core: fields, focus, validation, the controller state machine and
//! the renderer.
//!
//! - `field.rs`      : `FieldId`, `Field`, `EditEvent`
//! - `field_set.rs`  : ordered fields + focus transitions
//! - `validate.rs`   : address validator, `ValidationError`
//! - `controller.rs` : `FormController` state machine
//! - `render.rs`     : pure layout of a `FormState`
//!
//! Nothing in here touches the terminal except `render::draw`.

pub mod controller;
pub mod field;
pub mod field_set;
pub mod render;
pub mod validate;

pub use controller::{FormController, FormEvent, FormOptions, FormState, FormStatus};
pub use field::{EditEvent, Field, FieldId};
pub use field_set::FieldSet;
pub use validate::{ValidationError, address_validator, validate_address};
