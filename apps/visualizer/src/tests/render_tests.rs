use super::*;

use shared::domain::{SortKind, StepResult};

fn render_frame(result: &StepResult, step: usize) -> String {
    let mut out = Vec::new();
    {
        let mut renderer = TerminalRenderer::new(&mut out, 10);
        renderer.on_step(&StepEvent::new(SortKind::Lsd, step, result));
        assert!(renderer.take_error().is_none());
    }
    String::from_utf8(out).expect("utf8")
}

#[test]
fn hex_colours_parse() {
    assert_eq!(hex_to_rgb("#66c2a5"), Some((0x66, 0xc2, 0xa5)));
    assert_eq!(hex_to_rgb("66c2a5"), None);
    assert_eq!(hex_to_rgb("#66c2"), None);
    assert_eq!(hex_to_rgb("#zzzzzz"), None);
}

#[test]
fn bars_scale_to_largest_value() {
    assert_eq!(bar_length(100, 100, 10), 10);
    assert_eq!(bar_length(50, 100, 10), 5);
    assert_eq!(bar_length(1, 1000, 10), 1);
    assert_eq!(bar_length(0, 1000, 10), 0);
    assert_eq!(bar_length(0, 0, 10), 0);
    assert_eq!(bar_length(u64::MAX, u64::MAX, 50), 50);
}

#[test]
fn plain_frame_lists_every_value() {
    let frame = render_frame(&StepResult::Progressed(vec![20, 10]), 1);
    assert_eq!(
        frame,
        "LSD step 1 (progressed)\n  0 ██████████ 20\n  1 █████ 10\n"
    );
}

#[test]
fn coloured_frame_uses_palette() {
    let mut out = Vec::new();
    {
        let mut renderer = TerminalRenderer::new(&mut out, 4).with_color(true);
        let result = StepResult::Completed(vec![3]);
        renderer.on_step(&StepEvent::new(SortKind::Msd, 2, &result));
    }
    let frame = String::from_utf8(out).expect("utf8");
    assert!(frame.starts_with("MSD step 2 (completed)\n"));
    assert!(frame.contains("\x1b[38;2;255;170;170m████\x1b[0m 3"));
}

#[test]
fn cleared_frames_start_with_escape() {
    let mut out = Vec::new();
    {
        let mut renderer = TerminalRenderer::new(&mut out, 4).with_clear(true);
        let result = StepResult::Progressed(vec![1]);
        renderer.on_step(&StepEvent::new(SortKind::Lsd, 0, &result));
    }
    assert!(out.starts_with(CLEAR_SCREEN.as_bytes()));
}

#[test]
fn highlight_redraws_known_index_only() {
    let mut out = Vec::new();
    {
        let mut renderer = TerminalRenderer::new(&mut out, 2);
        let result = StepResult::Completed(vec![1, 2]);
        renderer.on_step(&StepEvent::new(SortKind::Lsd, 1, &result));
        renderer.on_highlight(1, "#66c2a5");
        renderer.on_highlight(5, "#66c2a5");
        renderer.on_status("done");
    }
    let out = String::from_utf8(out).expect("utf8");
    assert!(out.ends_with("  1 ██ 2 *\n> done\n"));
}

#[test]
fn json_renderer_writes_one_event_per_line() {
    let mut out = Vec::new();
    {
        let mut renderer = JsonRenderer::new(&mut out);
        let result = StepResult::Progressed(vec![5, 1]);
        renderer.on_step(&StepEvent::new(SortKind::Lsd, 0, &result));
        renderer.on_status("Sorting with LSD...");
        renderer.on_highlight(0, "#66c2a5");
        assert!(renderer.take_error().is_none());
    }
    let out = String::from_utf8(out).expect("utf8");

    let events: Vec<PlaybackEvent> = out
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();
    assert_eq!(
        events,
        vec![
            PlaybackEvent::Step {
                kind: SortKind::Lsd,
                step: 0,
                status: StepStatus::Progressed,
                sequence: vec![5, 1],
            },
            PlaybackEvent::Status {
                message: "Sorting with LSD...".to_string(),
            },
            PlaybackEvent::Highlight {
                index: 0,
                color: "#66c2a5".to_string(),
            },
        ]
    );
}

#[test]
fn renderer_reports_engine_errors_per_format() {
    let err = EngineError::precondition("cannot start a radix sort on an empty sequence");

    let mut terminal_out = Vec::new();
    Renderer::Terminal(TerminalRenderer::new(&mut terminal_out, 5)).report_error(&err);
    assert_eq!(
        String::from_utf8(terminal_out).expect("utf8"),
        "> Error: precondition failed: cannot start a radix sort on an empty sequence\n"
    );

    let mut json_out = Vec::new();
    {
        let mut json = Renderer::Json(JsonRenderer::new(&mut json_out));
        json.report_error(&err);
        assert!(json.take_error().is_none());
    }
    let out = String::from_utf8(json_out).expect("utf8");
    let event: PlaybackEvent = serde_json::from_str(out.trim_end()).expect("json");
    assert_eq!(event, PlaybackEvent::Error((&err).into()));
}
