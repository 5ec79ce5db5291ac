//! Runtime helpers behind `virtual/react-router/with-props`

const WITH_PROPS_SOURCE: &str = include_str!("../templates/with-props.js");

/// Source of the component props wrapper module
pub fn with_props_module() -> &'static str {
    WITH_PROPS_SOURCE
}
