/*!
 * Settings metadata registry.
 *
 * Every configurable field is described once here: its dotted path, its kind
 * (with the numeric range where relevant), its default value and the form
 * group it belongs to. The registry is the last fallback level of the
 * resolver and the source of the ranges numeric fields are clamped to.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};

use super::tree::{get_path, set_path};

/// Highest textbox count a slide layout may use
pub const MAX_TEXTBOXES: usize = 6;

static COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("Invalid color regex"));

static STANDARD_REGISTRY: Lazy<SettingsRegistry> = Lazy::new(SettingsRegistry::standard);

/// Kind of value a field holds
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Bool,
    /// Number constrained to a range; integer fields are rounded
    Number { min: f64, max: f64, integer: bool },
    /// `#RRGGBB` color
    Color,
    Text,
    /// One of a fixed set of strings
    Choice(&'static [&'static str]),
    /// Optional background image reference
    Image,
}

/// Metadata for one configurable field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Dotted path from the scope root, e.g. `content.main.text.fontSize`
    pub path: String,
    pub kind: FieldKind,
    pub default: Value,
    /// Form group the field is shown in
    pub group: &'static str,
}

impl FieldSpec {
    pub fn new(path: impl Into<String>, kind: FieldKind, default: Value, group: &'static str) -> Self {
        Self {
            path: path.into(),
            kind,
            default,
            group,
        }
    }

    /// Top-level category (`general`, `file`, `cover` or `content`)
    pub fn category(&self) -> &str {
        self.path.split('.').next().unwrap_or_default()
    }

    /// Normalize a stored value to this field's kind and range.
    ///
    /// Returns `None` when the value is already acceptable, otherwise the
    /// replacement: numbers are clamped, anything of the wrong type falls
    /// back to the default.
    pub fn normalize(&self, value: &Value) -> Option<Value> {
        match &self.kind {
            FieldKind::Bool => (!value.is_boolean()).then(|| self.default.clone()),
            FieldKind::Number { min, max, integer } => {
                let Some(number) = value.as_f64() else {
                    return Some(self.default.clone());
                };
                let clamped = number.clamp(*min, *max);
                if *integer {
                    let rounded = clamped.round() as i64;
                    if value.as_i64() == Some(rounded) {
                        None
                    } else {
                        Some(Value::from(rounded))
                    }
                } else if clamped != number {
                    Some(json!(clamped))
                } else {
                    None
                }
            }
            FieldKind::Color => match value.as_str() {
                Some(color) if COLOR_REGEX.is_match(color) => None,
                _ => Some(self.default.clone()),
            },
            FieldKind::Text => (!value.is_string()).then(|| self.default.clone()),
            FieldKind::Choice(options) => match value.as_str() {
                Some(choice) if options.contains(&choice) => None,
                _ => Some(self.default.clone()),
            },
            FieldKind::Image => (!(value.is_null() || value.is_string())).then(|| self.default.clone()),
        }
    }
}

/// Category → field → metadata table
#[derive(Debug, Clone)]
pub struct SettingsRegistry {
    fields: Vec<FieldSpec>,
    defaults: Value,
}

impl SettingsRegistry {
    /// Build a registry from field descriptions
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        let mut defaults = Value::Object(Map::new());
        for field in &fields {
            set_path(&mut defaults, &field.path, field.default.clone());
        }
        Self { fields, defaults }
    }

    /// Shared instance of the standard registry
    pub fn global() -> &'static SettingsRegistry {
        &STANDARD_REGISTRY
    }

    /// All fields, in declaration order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a field by dotted path
    pub fn field(&self, path: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.path == path)
    }

    /// Fields of one top-level category
    pub fn category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a FieldSpec> + 'a {
        self.fields.iter().filter(move |field| field.category() == category)
    }

    /// Fields of one form group
    pub fn group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a FieldSpec> + 'a {
        self.fields.iter().filter(move |field| field.group == group)
    }

    /// Default scope object with every field populated
    pub fn defaults(&self) -> &Value {
        &self.defaults
    }

    /// Normalize every registered field present in a scope object.
    ///
    /// Returns how many fields were adjusted.
    pub fn clamp(&self, scopes: &mut Value) -> usize {
        let mut adjusted = 0;
        for field in &self.fields {
            let Some(current) = get_path(scopes, &field.path) else {
                continue;
            };
            if let Some(replacement) = field.normalize(current) {
                debug!(
                    "Adjusted setting {} from {} to {}",
                    field.path, current, replacement
                );
                set_path(scopes, &field.path, replacement);
                adjusted += 1;
            }
        }
        adjusted
    }

    /// The registry shipped with the library
    pub fn standard() -> Self {
        let mut fields = vec![
            FieldSpec::new("general.useDifferentSettingForEachSection", FieldKind::Bool, json!(false), "general"),
            FieldSpec::new("general.removeIdenticalWords", FieldKind::Bool, json!(false), "general"),
            FieldSpec::new(
                "general.secondaryText",
                FieldKind::Choice(&["none", "translation", "transliteration"]),
                json!("transliteration"),
                "general",
            ),
            FieldSpec::new("general.autoOutput", FieldKind::Bool, json!(false), "general"),
            FieldSpec::new("file.fileName", FieldKind::Text, json!("lyrics"), "file"),
            FieldSpec::new("file.title", FieldKind::Text, json!(""), "file"),
            FieldSpec::new("file.author", FieldKind::Text, json!(""), "file"),
            FieldSpec::new("file.layout", FieldKind::Choice(&["16x9", "16x10", "4x3"]), json!("16x9"), "file"),
        ];

        // Cover slide
        fields.extend(background_fields("cover", "#000000"));
        fields.extend(box_fields("cover.position", 5.0, 30.0, 90.0, 40.0, "cover"));
        fields.extend(text_style_fields("cover.main.text", 48, "#FFFFFF", true, false, "cover"));
        fields.push(FieldSpec::new("cover.secondary.enabled", FieldKind::Bool, json!(true), "cover"));
        fields.extend(text_style_fields("cover.secondary.text", 28, "#CCCCCC", false, true, "cover"));

        // Content slides
        fields.extend(background_fields("content", "#000000"));
        fields.push(FieldSpec::new(
            "content.textbox.linesPerTextbox",
            FieldKind::Number { min: 1.0, max: 20.0, integer: true },
            json!(2),
            "layout",
        ));
        fields.push(FieldSpec::new(
            "content.textbox.textboxCount",
            FieldKind::Number { min: 1.0, max: MAX_TEXTBOXES as f64, integer: true },
            json!(2),
            "layout",
        ));
        for number in 1..=MAX_TEXTBOXES {
            let (y, height) = default_textbox_band(number);
            fields.extend(box_fields(
                &format!("content.textboxes.textbox{}", number),
                5.0,
                y,
                90.0,
                height,
                "layout",
            ));
        }
        fields.extend(text_style_fields("content.main.text", 36, "#FFFFFF", false, false, "content"));
        fields.push(FieldSpec::new("content.secondary.enabled", FieldKind::Bool, json!(true), "content"));
        fields.extend(text_style_fields("content.secondary.text", 24, "#BBBBBB", false, true, "content"));

        Self::new(fields)
    }
}

fn default_textbox_band(number: usize) -> (f64, f64) {
    match number {
        1 => (10.0, 40.0),
        2 => (50.0, 40.0),
        n => (5.0 + (n as f64 - 3.0) * 25.0, 20.0),
    }
}

fn percent() -> FieldKind {
    FieldKind::Number { min: 0.0, max: 100.0, integer: false }
}

fn background_fields(category: &str, color: &str) -> Vec<FieldSpec> {
    vec![
        FieldSpec::new(format!("{}.background.color", category), FieldKind::Color, json!(color), "background"),
        FieldSpec::new(format!("{}.background.image", category), FieldKind::Image, Value::Null, "background"),
    ]
}

fn box_fields(prefix: &str, x: f64, y: f64, width: f64, height: f64, group: &'static str) -> Vec<FieldSpec> {
    vec![
        FieldSpec::new(format!("{}.positionX", prefix), percent(), json!(x), group),
        FieldSpec::new(format!("{}.positionY", prefix), percent(), json!(y), group),
        FieldSpec::new(format!("{}.width", prefix), percent(), json!(width), group),
        FieldSpec::new(format!("{}.height", prefix), percent(), json!(height), group),
    ]
}

fn text_style_fields(
    prefix: &str,
    font_size: u32,
    color: &str,
    bold: bool,
    italic: bool,
    group: &'static str,
) -> Vec<FieldSpec> {
    let field = |name: &str, kind: FieldKind, default: Value| {
        FieldSpec::new(format!("{}.{}", prefix, name), kind, default, group)
    };
    let size = |max: f64| FieldKind::Number { min: 0.0, max, integer: false };

    vec![
        field("fontFace", FieldKind::Text, json!("Arial")),
        field("fontSize", FieldKind::Number { min: 6.0, max: 200.0, integer: false }, json!(font_size)),
        field("color", FieldKind::Color, json!(color)),
        field("bold", FieldKind::Bool, json!(bold)),
        field("italic", FieldKind::Bool, json!(italic)),
        field("align", FieldKind::Choice(&["left", "center", "right"]), json!("center")),
        field("lineSpacing", FieldKind::Number { min: 0.5, max: 3.0, integer: false }, json!(1.0)),
        field("shadow.enabled", FieldKind::Bool, json!(false)),
        field("shadow.color", FieldKind::Color, json!("#000000")),
        field("shadow.blur", size(50.0), json!(3.0)),
        field("shadow.offset", size(50.0), json!(2.0)),
        field("glow.enabled", FieldKind::Bool, json!(false)),
        field("glow.color", FieldKind::Color, json!("#FFFFFF")),
        field("glow.size", size(50.0), json!(5.0)),
        field("outline.enabled", FieldKind::Bool, json!(false)),
        field("outline.color", FieldKind::Color, json!("#000000")),
        field("outline.width", size(20.0), json!(1.0)),
    ]
}
