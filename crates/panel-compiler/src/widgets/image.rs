//! Local and downloaded bitmaps.

use serde_json::{json, Value};

use crate::aggregate::{ComponentRequest, HookContext};
use crate::context::GenerationContext;
use crate::mode::{SupportedModes, TargetMode};
use crate::profile::DisplayType;
use crate::registry::slug;

use super::emit;
use super::schema::{PropSpec, WidgetView};
use super::WidgetExport;

const IMAGE_PROPS: &[PropSpec] = &[PropSpec::str("path", ""), PropSpec::bool("invert", false)];

const ONLINE_PROPS: &[PropSpec] = &[
    PropSpec::str("url", ""),
    PropSpec::int("interval", 300),
    PropSpec::bool("invert", false),
];

/// File name without directories and extension, as an id fragment.
fn stem(location: &str) -> String {
    let location = location.trim().trim_matches('"');
    let location = location.split(['?', '#']).next().unwrap_or_default();
    let name = location.rsplit(['/', '\\']).next().unwrap_or_default();
    let name = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    let mut out = String::with_capacity(name.len());
    for ch in slug(name).chars() {
        if ch == '_' && (out.is_empty() || out.ends_with('_')) {
            continue;
        }
        out.push(ch);
    }
    let out = out.trim_end_matches('_');
    if out.is_empty() {
        "image".to_string()
    } else {
        out.to_string()
    }
}

fn asset_id(prefix: &str, location: &str, view: &WidgetView<'_>) -> String {
    format!(
        "{prefix}_{}_{}x{}",
        stem(location),
        view.widget.width,
        view.widget.height
    )
}

/// `it.image(...)`; monochrome panels get explicit on/off colors.
fn direct_image(view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>, id: &str) {
    let widget = view.widget;
    if ctx.profile().display_type == DisplayType::Color {
        ctx.line(format!("it.image({}, {}, id({id}));", widget.x, widget.y));
        return;
    }
    let (mut on, mut off) = (ctx.direct_color("black"), ctx.direct_color("white"));
    if view.bool("invert") {
        std::mem::swap(&mut on, &mut off);
    }
    ctx.line(format!("it.image({}, {}, id({id}), {on}, {off});", widget.x, widget.y));
}

fn retained_image(view: &WidgetView<'_>, id: &str) -> Value {
    let widget = view.widget;
    let mut node = serde_json::Map::new();
    node.insert("id".into(), Value::from(view.ident()));
    node.insert("x".into(), Value::from(widget.x));
    node.insert("y".into(), Value::from(widget.y));
    node.insert("src".into(), Value::from(id));
    emit::node("image", node)
}

fn dlimg(view: &WidgetView<'_>, url: &str) -> Value {
    let widget = view.widget;
    json!({
        "type": "dlimg",
        "url": url,
        "x": widget.x,
        "y": widget.y,
        "xsize": widget.width,
        "ysize": widget.height,
        "rotate": 0,
    })
}

pub struct Image;

impl Image {
    fn path(view: &WidgetView<'_>) -> Option<String> {
        let path = view.str("path").trim().trim_matches('"').to_string();
        (!path.is_empty()).then_some(path)
    }
}

impl WidgetExport for Image {
    fn type_tag(&self) -> &'static str {
        "image"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::ALL
    }

    fn props(&self) -> &'static [PropSpec] {
        IMAGE_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (200, 150)
    }

    fn export_direct(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        if let Some(path) = Self::path(view) {
            direct_image(view, ctx, &asset_id("img", &path, view));
        }
    }

    fn export_retained(&self, view: &WidgetView<'_>, _ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Self::path(view).map(|path| retained_image(view, &asset_id("img", &path, view)))
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, _ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Self::path(view).map(|path| dlimg(view, &path))
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, _ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Self::path(view).map(|path| dlimg(view, &path))
    }

    fn components(&self, view: &WidgetView<'_>, hooks: &HookContext<'_>) -> Vec<ComponentRequest> {
        let Some(path) = Self::path(view) else {
            return Vec::new();
        };
        if hooks.mode.is_protocol() {
            return Vec::new();
        }
        let id = asset_id("img", &path, view);
        let display_type = hooks.profile.display_type;
        let mut lines = vec![
            format!("  - file: {}", emit::yaml_quote(&path)),
            format!("    id: {id}"),
            format!("    type: {}", display_type.image_type()),
            format!("    resize: {}x{}", view.widget.width, view.widget.height),
        ];
        if display_type == DisplayType::Binary {
            lines.push("    dither: FLOYDSTEINBERG".to_string());
        }
        vec![ComponentRequest::new("image", id, lines)]
    }
}

pub struct OnlineImage;

impl OnlineImage {
    fn url(view: &WidgetView<'_>) -> Option<String> {
        let url = view.str("url").trim().trim_matches('"').to_string();
        (!url.is_empty()).then_some(url)
    }

    fn format(url: &str) -> &'static str {
        let lower = url.to_ascii_lowercase();
        let path = lower.split(['?', '#']).next().unwrap_or_default();
        if path.ends_with(".jpg") || path.ends_with(".jpeg") {
            "JPEG"
        } else if path.ends_with(".bmp") {
            "BMP"
        } else {
            "PNG"
        }
    }
}

impl WidgetExport for OnlineImage {
    fn type_tag(&self) -> &'static str {
        "online_image"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::ALL
    }

    fn props(&self) -> &'static [PropSpec] {
        ONLINE_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (200, 150)
    }

    fn export_direct(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        if let Some(url) = Self::url(view) {
            direct_image(view, ctx, &asset_id("online_img", &url, view));
        }
    }

    fn export_retained(&self, view: &WidgetView<'_>, _ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Self::url(view).map(|url| retained_image(view, &asset_id("online_img", &url, view)))
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, _ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Self::url(view).map(|url| dlimg(view, &url))
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, _ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Self::url(view).map(|url| dlimg(view, &url))
    }

    fn components(&self, view: &WidgetView<'_>, hooks: &HookContext<'_>) -> Vec<ComponentRequest> {
        let Some(url) = Self::url(view) else {
            return Vec::new();
        };
        if hooks.mode.is_protocol() {
            return Vec::new();
        }
        let id = asset_id("online_img", &url, view);
        let on_done = if hooks.mode == TargetMode::Retained {
            format!("        - lvgl.widget.refresh: {}", view.ident())
        } else {
            format!("        - component.update: {}", hooks.profile.display_id)
        };
        let interval = view.int("interval").max(1);
        vec![
            ComponentRequest::new(
                "http_request",
                "http_request",
                vec!["  verify_ssl: false".to_string(), "  timeout: 10s".to_string()],
            ),
            ComponentRequest::new(
                "online_image",
                id.clone(),
                vec![
                    format!("  - id: {id}"),
                    format!("    url: {}", emit::yaml_quote(&url)),
                    format!("    format: {}", Self::format(&url)),
                    format!("    type: {}", hooks.profile.display_type.image_type()),
                    format!("    resize: {}x{}", view.widget.width, view.widget.height),
                    "    update_interval: never".to_string(),
                    "    on_download_finished:".to_string(),
                    "      then:".to_string(),
                    on_done,
                ],
            ),
            ComponentRequest::new(
                "interval",
                format!("interval_{id}"),
                vec![
                    format!("  - interval: {interval}s"),
                    "    then:".to_string(),
                    format!("      - component.update: {id}"),
                ],
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems_drop_directories_and_extensions() {
        assert_eq!(stem("/config/www/My Photo.png"), "my_photo");
        assert_eq!(stem("https://example.com/cam/snap.jpg?t=1"), "snap");
        assert_eq!(stem("C:\\img\\__logo__.bmp"), "logo");
        assert_eq!(stem(""), "image");
    }

    #[test]
    fn online_format_from_extension() {
        assert_eq!(OnlineImage::format("http://x/a.JPG"), "JPEG");
        assert_eq!(OnlineImage::format("http://x/a"), "PNG");
    }
}
