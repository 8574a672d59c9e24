use serde_json::Value;

/// The array property scanned by resource-type queries.
pub const RESOURCES_PROPERTY: &str = "resources";
/// The element property compared against the requested resource type.
pub const TYPE_PROPERTY: &str = "type";

/// Looks up a property on a JSON object, ignoring case.
///
/// An exact-case match wins over other keys that only match ignoring case.
///
/// # Arguments
///
/// * `value` - The JSON value to look in. Anything but an object yields `None`.
/// * `name` - The property name to look for.
///
/// # Returns
///
/// The key as spelled in the document together with its value.
pub fn find_property<'a>(value: &'a Value, name: &str) -> Option<(&'a str, &'a Value)> {
    let map = value.as_object()?;

    let wanted = name.to_lowercase();
    let mut folded = None;
    for (key, child) in map {
        if key == name {
            return Some((key.as_str(), child));
        }
        if folded.is_none() && key.to_lowercase() == wanted {
            folded = Some((key.as_str(), child));
        }
    }
    folded
}

/// Lists the elements of the `resources` array whose `type` equals `resource_type`.
///
/// The `resources` property is found the same way navigation finds properties, but the
/// `type` values are compared ordinally, so `"Microsoft.Web/sites"` does not match
/// `"microsoft.web/sites"`. If `resources` is missing, is not an array, or holds anything
/// but objects, the result is empty.
///
/// # Returns
///
/// The canonical spelling of the `resources` key and the `(index, element)` pairs that
/// matched, in array order.
pub fn resources_of_type<'a>(
    value: &'a Value,
    resource_type: &str,
) -> Option<(&'a str, Vec<(usize, &'a Value)>)> {
    let (key, resources) = find_property(value, RESOURCES_PROPERTY)?;

    let Some(elements) = resources.as_array() else {
        log::debug!("{key} is not an array, skipping resource type lookup");
        return None;
    };
    if !elements.iter().all(Value::is_object) {
        log::debug!("{key} contains non-object elements, skipping resource type lookup");
        return None;
    }

    let matches = elements
        .iter()
        .enumerate()
        .filter(|(_, element)| type_matches(element, resource_type))
        .collect();

    Some((key, matches))
}

fn type_matches(element: &Value, resource_type: &str) -> bool {
    find_property(element, TYPE_PROPERTY)
        .and_then(|(_, value)| value.as_str())
        .is_some_and(|value| value == resource_type)
}
