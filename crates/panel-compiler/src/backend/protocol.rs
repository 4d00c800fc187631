//! `drawcustom` service calls for the two e-paper drawing protocols.

use panel_syntax::quote;
use serde_json::{json, Value};

use crate::aggregate::Aggregated;
use crate::config::ProtocolConfig;
use crate::context::GenerationContext;
use crate::mode::TargetMode;
use crate::model::Page;
use crate::widgets::{WidgetExport, WidgetView};

use super::{yaml, Backend, Output};

#[derive(Debug)]
struct PayloadPage {
    name: String,
    background: String,
    payload: Vec<Value>,
}

#[derive(Debug)]
pub(crate) struct ProtocolBackend {
    mode: TargetMode,
    config: ProtocolConfig,
    pages: Vec<PayloadPage>,
}

impl ProtocolBackend {
    pub(crate) fn new(mode: TargetMode, config: ProtocolConfig) -> Self {
        Self {
            mode,
            config,
            pages: Vec::new(),
        }
    }

    fn service_call(&self, page: &PayloadPage) -> Value {
        let target = json!({ "entity_id": self.config.entity_id.as_str() });
        if self.mode == TargetMode::ProtocolA {
            json!({
                "service": "open_epaper_link.drawcustom",
                "target": target,
                "data": {
                    "background": page.background,
                    "rotate": self.config.rotate,
                    "dither": self.config.dither,
                    "ttl": self.config.ttl,
                    "payload": page.payload,
                },
            })
        } else {
            json!({
                "service": "opendisplay.drawcustom",
                "target": target,
                "data": {
                    "background": page.background,
                    "rotate": self.config.rotate,
                    "payload": page.payload,
                },
            })
        }
    }
}

impl Backend for ProtocolBackend {
    fn begin_page(&mut self, _index: usize, page: &Page, ctx: &mut GenerationContext<'_>) {
        self.pages.push(PayloadPage {
            name: page.name.clone(),
            background: ctx.protocol_color(&self.config.background),
            payload: Vec::new(),
        });
    }

    fn emit(
        &mut self,
        handler: &dyn WidgetExport,
        view: &WidgetView<'_>,
        ctx: &mut GenerationContext<'_>,
    ) -> bool {
        let element = if self.mode == TargetMode::ProtocolA {
            handler.export_protocol_a(view, ctx)
        } else {
            handler.export_protocol_b(view, ctx)
        };
        let Some(page) = self.pages.last_mut() else {
            return false;
        };
        match element {
            None => false,
            Some(Value::Array(items)) => {
                let produced = !items.is_empty();
                page.payload.extend(items);
                produced
            }
            Some(element) => {
                page.payload.push(element);
                true
            }
        }
    }

    fn end_page(&mut self, _ctx: &mut GenerationContext<'_>) {}

    fn finish(self: Box<Self>, _ctx: &GenerationContext<'_>, _aggregated: Option<&Aggregated>) -> Output {
        let calls: Vec<Value> = self.pages.iter().map(|page| self.service_call(page)).collect();
        let text = if self.mode == TargetMode::ProtocolA {
            let mut text = serde_json::to_string_pretty(&calls).unwrap_or_default();
            text.push('\n');
            text
        } else {
            let mut lines = Vec::new();
            for (page, call) in self.pages.iter().zip(&calls) {
                lines.push(format!("# page:name {}", quote(&page.name)));
                yaml::write_seq(&mut lines, 0, std::slice::from_ref(call));
            }
            let mut text = lines.join("\n");
            text.push('\n');
            text
        };
        Output {
            text,
            document: Value::Array(calls),
        }
    }
}
