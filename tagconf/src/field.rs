//! Field descriptors and their tags.

use crate::coerce::Target;

/// Separator used for `choices` and list values when no `delimiter` tag is set.
pub const DEFAULT_DELIMITER: &str = ",";

/// The recognized per-field options, each holding its raw tag text.
///
/// `#[derive(TagConf)]` fills this from `#[conf(...)]` attributes. Hand-written
/// [`TagConf`](crate::TagConf) impls can use the builder methods:
///
/// ```rust
/// use tagconf::Tags;
///
/// let tags = Tags::new()
///     .with_env("PORT")
///     .with_default("8080")
///     .with_choices("80,8080");
/// assert_eq!(tags.env, Some("PORT"));
/// assert_eq!(tags.delimiter(), ",");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tags {
    /// Source key. Fields without it are skipped.
    pub env: Option<&'static str>,
    /// Fallback raw value used when the source has no non-empty value.
    pub default: Option<&'static str>,
    /// Boolean token deciding whether a missing value is an error.
    pub required: Option<&'static str>,
    /// Delimited set of permitted raw values.
    pub choices: Option<&'static str>,
    /// Separator for `choices` and list values.
    pub delimiter: Option<&'static str>,
}

impl Tags {
    /// Tags with no options set.
    pub const fn new() -> Self {
        Self {
            env: None,
            default: None,
            required: None,
            choices: None,
            delimiter: None,
        }
    }

    /// Set the source key.
    pub const fn with_env(mut self, key: &'static str) -> Self {
        self.env = Some(key);
        self
    }

    /// Set the fallback raw value.
    pub const fn with_default(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    /// Set the missing-value policy, a boolean token.
    pub const fn with_required(mut self, value: &'static str) -> Self {
        self.required = Some(value);
        self
    }

    /// Set the delimited set of permitted raw values.
    pub const fn with_choices(mut self, choices: &'static str) -> Self {
        self.choices = Some(choices);
        self
    }

    /// Override the `,` separator.
    pub const fn with_delimiter(mut self, delimiter: &'static str) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// The field's delimiter, `,` unless overridden.
    pub fn delimiter(&self) -> &'static str {
        self.delimiter.unwrap_or(DEFAULT_DELIMITER)
    }
}

/// One field of a record: its metadata and, when writable, its write target.
pub struct Field<'a> {
    /// Field name as declared.
    pub name: &'static str,
    /// Declared type, as reported by [`std::any::type_name`]. Named in
    /// conversion errors.
    pub type_name: &'static str,
    /// Options from the field's tags.
    pub tags: Tags,
    /// `None` when the field cannot be written.
    pub target: Option<Target<'a>>,
}

impl<'a> Field<'a> {
    /// Describe a field. Pass `None` as `target` for a field that cannot be
    /// written.
    pub fn new(
        name: &'static str,
        type_name: &'static str,
        tags: Tags,
        target: Option<Target<'a>>,
    ) -> Self {
        Self {
            name,
            type_name,
            tags,
            target,
        }
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("tags", &self.tags)
            .field("writable", &self.target.is_some())
            .finish()
    }
}
