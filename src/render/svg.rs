//! SVG document for one frame of the chart.

use crate::config::ChartConfig;
use crate::foundation::core::{Rgba8, Vec2};
use crate::render::scene::MarkSample;
use crate::render::tooltip::capitalize;
use crate::scale::encoding::{Axis, AxisOrient, Encodings};

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const AXIS_COLOR: &str = "#000000";

/// Everything needed to draw one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    /// Layout and colours.
    pub config: &'a ChartConfig,
    /// Scales, axes and legend.
    pub encodings: &'a Encodings,
    /// Large year label in the plot corner.
    pub time_label: &'a str,
    /// Marks in paint order.
    pub marks: &'a [MarkSample],
}

/// Escape text for use in XML content and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Compact decimal: at most three fractional digits, trailing zeros removed.
fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

fn fill_attrs(c: Rgba8) -> String {
    if c.a == 255 {
        format!("fill=\"{}\"", c.to_hex_rgb())
    } else {
        format!(
            "fill=\"{}\" fill-opacity=\"{}\"",
            c.to_hex_rgb(),
            num(c.opacity())
        )
    }
}

fn push_axis(out: &mut String, axis: &Axis, translate: Vec2) {
    let [e0, e1] = axis.extent;
    out.push_str(&format!(
        "<g class=\"axis\" transform=\"translate({}, {})\" fill=\"none\" font-size=\"10\" text-anchor=\"{}\">",
        num(translate.x),
        num(translate.y),
        match axis.orient {
            AxisOrient::Bottom => "middle",
            AxisOrient::Left => "end",
        }
    ));

    let domain = match axis.orient {
        AxisOrient::Bottom => format!(
            "M{},{}V0H{}V{}",
            num(e0),
            num(TICK_SIZE),
            num(e1),
            num(TICK_SIZE)
        ),
        AxisOrient::Left => format!(
            "M{},{}H0V{}H{}",
            num(-TICK_SIZE),
            num(e0),
            num(e1),
            num(-TICK_SIZE)
        ),
    };
    out.push_str(&format!(
        "<path class=\"domain\" stroke=\"{AXIS_COLOR}\" d=\"{domain}\"/>"
    ));

    for tick in &axis.ticks {
        if !tick.offset.is_finite() {
            continue;
        }
        match axis.orient {
            AxisOrient::Bottom => out.push_str(&format!(
                "<g class=\"tick\" transform=\"translate({}, 0)\"><line stroke=\"{AXIS_COLOR}\" y2=\"{}\"/><text fill=\"{AXIS_COLOR}\" y=\"{}\" dy=\"0.71em\">{}</text></g>",
                num(tick.offset),
                num(TICK_SIZE),
                num(TICK_SIZE + TICK_PADDING),
                escape_xml(&tick.label)
            )),
            AxisOrient::Left => out.push_str(&format!(
                "<g class=\"tick\" transform=\"translate(0, {})\"><line stroke=\"{AXIS_COLOR}\" x2=\"{}\"/><text fill=\"{AXIS_COLOR}\" x=\"{}\" dy=\"0.32em\">{}</text></g>",
                num(tick.offset),
                num(-TICK_SIZE),
                num(-(TICK_SIZE + TICK_PADDING)),
                escape_xml(&tick.label)
            )),
        }
    }
    out.push_str("</g>");
}

fn push_legend(out: &mut String, enc: &Encodings, width: f64, height: f64) {
    out.push_str(&format!(
        "<g class=\"legend\" transform=\"translate({}, {})\" font-size=\"12\">",
        num(width - 10.0),
        num(height - 125.0)
    ));
    for (i, (continent, color)) in enc.legend().into_iter().enumerate() {
        let label = capitalize(continent.as_str());
        out.push_str(&format!(
            "<g transform=\"translate(0, {})\"><rect width=\"10\" height=\"10\" {}/><text x=\"-10\" y=\"10\" text-anchor=\"end\">{}</text></g>",
            i * 20,
            fill_attrs(color),
            escape_xml(&label)
        ));
    }
    out.push_str("</g>");
}

/// Render the frame as a standalone SVG document.
///
/// Marks with non-finite geometry (for example a non-positive income on the log axis) are not
/// drawn.
pub fn build_document(view: &FrameView<'_>) -> String {
    let cfg = view.config;
    let plot = view.encodings.plot();
    let (w, h) = (cfg.canvas.width, cfg.canvas.height);
    let mut out = String::with_capacity(4096 + view.marks.len() * 256);

    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
    ));
    out.push_str(&format!(
        "<rect width=\"{w}\" height=\"{h}\" {}/>",
        fill_attrs(cfg.background)
    ));
    out.push_str(&format!(
        "<g transform=\"translate({}, {})\" font-family=\"sans-serif\">",
        cfg.margins.left, cfg.margins.top
    ));

    out.push_str(&format!(
        "<text class=\"x axis label\" x=\"{}\" y=\"{}\" font-size=\"20\" text-anchor=\"middle\">GDP Per Capita ($)</text>",
        num(plot.width / 2.0),
        num(plot.height + 60.0)
    ));
    out.push_str(&format!(
        "<text class=\"y axis label\" x=\"{}\" y=\"-40\" font-size=\"20\" text-anchor=\"middle\" transform=\"rotate(-90)\">Life Expectancy (Years)</text>",
        num(-plot.height / 2.0)
    ));
    out.push_str(&format!(
        "<text class=\"time label\" x=\"{}\" y=\"{}\" font-size=\"50\" opacity=\"0.5\" text-anchor=\"middle\">{}</text>",
        num(plot.width - 60.0),
        num(plot.height - 20.0),
        escape_xml(view.time_label)
    ));

    push_axis(&mut out, view.encodings.x_axis(), Vec2::new(0.0, plot.height));
    push_axis(&mut out, view.encodings.y_axis(), Vec2::ZERO);
    push_legend(&mut out, view.encodings, plot.width, plot.height);

    out.push_str("<g class=\"marks\">");
    for m in view.marks {
        let a = m.attrs;
        if !(a.cx.is_finite() && a.cy.is_finite() && a.r.is_finite()) {
            continue;
        }
        out.push_str(&format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {}><title>{}</title></circle>",
            num(a.cx),
            num(a.cy),
            num(a.r),
            fill_attrs(m.fill),
            escape_xml(&m.tooltip)
        ));
    }
    out.push_str("</g></g></svg>");
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
