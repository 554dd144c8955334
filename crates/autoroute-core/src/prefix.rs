//! Controller URL prefixes.

use crate::descriptor::ControllerDescriptor;
use crate::slug::slugify;

/// Trailing slug token removed from controller names.
pub const CONTROLLER_TOKEN: &str = "-controller";

/// Computes the URL prefix shared by every route of a controller.
///
/// A non-empty fixed prefix is returned as is. Otherwise the controller's
/// short name is slugified, a trailing `-controller` is stripped and the
/// configured prefix string is prepended.
pub fn resolve_prefix(descriptor: &ControllerDescriptor) -> String {
    if let Some(fixed) = descriptor
        .options
        .fixed_prefix
        .as_deref()
        .filter(|fixed| !fixed.is_empty())
    {
        return fixed.to_string();
    }

    let slug = slugify(&descriptor.name);
    let base = slug.strip_suffix(CONTROLLER_TOKEN).unwrap_or(&slug);
    format!("{}{}", descriptor.options.prefix, base)
}
