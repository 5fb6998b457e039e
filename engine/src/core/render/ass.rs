//! Burn-in Script Generator
//!
//! Builds the Advanced SubStation Alpha (ASS) script the encoder burns into
//! the output frame. Font size, placement and line layout come from the same
//! functions the preview uses, so both renderings agree.

use tracing::{debug, warn};

use super::font_scale::{round_half_up, video_font_size};
use crate::core::captions::{HighlightMode, Segment, StyleConfig};
use crate::core::playback::word_slice;
use crate::core::position::{resolve_position, ResolvedPosition, TextAlignment};
use crate::core::text::{format_text, FormatOptions, FormattedDisplay};
use crate::core::{Color, CoreError, CoreResult, TimeSec};

const STYLE_NAME: &str = "Default";

const STYLE_FORMAT: &str = "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, \
OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, \
BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding";

const EVENT_FORMAT: &str =
    "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

/// Converts `#RRGGBB` (or `#RGB`) to `&H00BBGGRR`; invalid input gives white
pub fn hex_to_ass_color(token: &str) -> String {
    Color::try_from_token(token)
        .unwrap_or_else(|_| Color::white())
        .to_ass_color()
}

/// Inline override color, `&HBBGGRR&`
fn inline_color(color: Color) -> String {
    format!("&H{:02X}{:02X}{:02X}&", color.b, color.g, color.r)
}

/// Formats seconds as `H:MM:SS.cc`, centiseconds truncated
pub fn format_ass_timestamp(seconds: TimeSec) -> String {
    // Tolerance keeps values like 1.15 from truncating to 1.14.
    let total_cs = (seconds.max(0.0) * 100.0 + 1e-6).floor() as u64;
    let cs = total_cs % 100;
    let total_secs = total_cs / 100;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = total_secs / 3600;

    format!("{}:{:02}:{:02}.{:02}", hours, mins, secs, cs)
}

/// Numpad alignment for a block vertically centered on its anchor
fn alignment_tag(alignment: TextAlignment) -> u8 {
    match alignment {
        TextAlignment::Left => 4,
        TextAlignment::Center => 5,
        TextAlignment::Right => 6,
    }
}

/// Override block placing a line at the resolved position
fn placement_tags(position: &ResolvedPosition, width: i64, height: i64) -> String {
    let x = round_half_up(position.x_percent / 100.0 * width as f64) as i64;
    let y = round_half_up(position.y_percent / 100.0 * height as f64) as i64;
    format!(
        "{{\\an{}\\pos({},{})}}",
        alignment_tag(position.alignment),
        x,
        y
    )
}

/// Extra override tags for the current word
fn highlight_tags(mode: HighlightMode, border_width: f64) -> String {
    match mode {
        HighlightMode::None => String::new(),
        HighlightMode::Shadow => "\\shad2".to_string(),
        HighlightMode::Border => format!("\\bord{}", border_width + 2.0),
        HighlightMode::Glow => "\\blur3".to_string(),
        HighlightMode::DoubleBorder => format!("\\bord{}", (border_width * 2.0).max(2.0)),
        HighlightMode::ThickShadow => "\\shad4".to_string(),
    }
}

/// Override blocks cannot be escaped in ASS, so braces become parentheses
fn escape_text(text: &str) -> String {
    text.replace('{', "(")
        .replace('}', ")")
        .replace('\\', "/")
}

/// Joins the display lines with `\N`, wrapping word `current` in a
/// highlight override block when given.
fn event_text(display: &FormattedDisplay, current: Option<usize>, highlight: &str) -> String {
    let mut lines: Vec<Vec<String>> = vec![Vec::new(); display.lines.len()];

    for word in &display.words {
        let text = escape_text(&word.text);
        let rendered = if Some(word.global_index) == current {
            format!("{{{}}}{}{{\\r}}", highlight, text)
        } else {
            text
        };
        if let Some(line) = lines.get_mut(word.line_index) {
            line.push(rendered);
        }
    }

    lines
        .iter()
        .map(|words| words.join(" "))
        .collect::<Vec<_>>()
        .join("\\N")
}

fn dialogue(start: TimeSec, end: TimeSec, placement: &str, text: &str) -> String {
    format!(
        "Dialogue: 0,{},{},{},,0,0,0,,{}{}\n",
        format_ass_timestamp(start),
        format_ass_timestamp(end),
        STYLE_NAME,
        placement,
        text
    )
}

/// Builds an ASS script rendering `segments` on a `width` x `height` frame.
///
/// Segments with invalid timing or no words after formatting are skipped.
/// With karaoke on, every segment becomes one event per word slice.
pub fn build_ass_script(
    segments: &[Segment],
    style: &StyleConfig,
    width: i64,
    height: i64,
) -> CoreResult<String> {
    if width <= 0 {
        return Err(CoreError::InvalidDimension {
            label: "width",
            value: width,
        });
    }
    if height <= 0 {
        return Err(CoreError::InvalidDimension {
            label: "height",
            value: height,
        });
    }

    let style = style.clone().normalized();
    let font_size = video_font_size(style.font_size_nominal, width)?;
    let options = FormatOptions::from(&style);
    let placement = placement_tags(&resolve_position(&style), width, height);

    let mut script = String::new();
    script.push_str("[Script Info]\n");
    script.push_str("Title: subcue burn-in\n");
    script.push_str("ScriptType: v4.00+\n");
    script.push_str(&format!("PlayResX: {}\n", width));
    script.push_str(&format!("PlayResY: {}\n", height));
    script.push_str("WrapStyle: 2\n");
    script.push_str("ScaledBorderAndShadow: yes\n\n");

    script.push_str("[V4+ Styles]\n");
    script.push_str(STYLE_FORMAT);
    script.push('\n');
    script.push_str(&format!(
        "Style: {},{},{},{},{},{},&H00000000,0,0,0,0,100,100,0,0,1,{},0,5,10,10,10,1\n\n",
        STYLE_NAME,
        style.font_family.replace(',', " "),
        font_size,
        hex_to_ass_color(&style.font_color),
        hex_to_ass_color(&style.font_color),
        hex_to_ass_color(&style.border_color),
        style.border_width_px,
    ));

    script.push_str("[Events]\n");
    script.push_str(EVENT_FORMAT);
    script.push('\n');

    let highlight = format!(
        "\\1c{}\\3c{}{}",
        inline_color(style.current_word_color()),
        inline_color(style.current_word_border_color()),
        highlight_tags(style.highlight_mode, style.border_width_px)
    );

    let mut events = 0usize;
    for (index, segment) in segments.iter().enumerate() {
        if let Err(e) = segment.validate() {
            warn!("Skipping segment {} in burn-in script: {}", index, e);
            continue;
        }

        let display = format_text(&segment.text, &options);
        if display.is_empty() {
            continue;
        }

        if style.use_karaoke {
            let count = display.word_count();
            for word in 0..count {
                if let Some((start, end)) = word_slice(segment, count, word) {
                    let text = event_text(&display, Some(word), &highlight);
                    script.push_str(&dialogue(start, end, &placement, &text));
                    events += 1;
                }
            }
        } else {
            let text = event_text(&display, None, &highlight);
            script.push_str(&dialogue(segment.start, segment.end, &placement, &text));
            events += 1;
        }
    }

    debug!(
        "Built burn-in script: {} events at {}x{}, font {}px",
        events, width, height, font_size
    );
    Ok(script)
}
