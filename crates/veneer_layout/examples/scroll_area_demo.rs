//! Veneer Scroll Area Demo
//!
//! Run with:
//! `cargo run -p veneer_layout --example scroll_area_demo`
//!
//! Optional:
//! - Set `VENEER_CONFIG` to a TOML file to override the scroll area config
//! - Set `VENEER_SCENARIO` to a JSON scenario file to replay it instead

use anyhow::{Context, Result};
use veneer_animation::ManualClock;
use veneer_core::events::{event_types, Event, EventDispatcher};
use veneer_core::geometry::{Axis, Point, Rect, Size};
use veneer_layout::prelude::*;
use veneer_layout::{Scenario, ScenarioRunner};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    if let Ok(path) = std::env::var("VENEER_SCENARIO") {
        let scenario = Scenario::from_path(&path)
            .with_context(|| format!("failed to load scenario {path}"))?;
        let report = ScenarioRunner::new(scenario).run()?;
        tracing::info!(?report, "scenario passed");
        return Ok(());
    }

    let config = match std::env::var("VENEER_CONFIG") {
        Ok(path) => ScrollAreaConfig::load(&path)
            .with_context(|| format!("failed to load config {path}"))?,
        Err(_) => ScrollAreaConfig::default(),
    };

    // A 320x480 feed with 40 rows of 48px
    let host = MemoryHost::new(Rect::new(0.0, 0.0, 320.0, 480.0), Size::new(320.0, 1_920.0));
    let clock = ManualClock::shared();
    let window = EventDispatcher::new();

    let area = ScrollArea::new(host, config, clock.clone())
        .class("feed")
        .attr("role", "region");
    area.mount();
    area.attach(&window);
    report("mounted", &area.render());

    for offset in [120.0, 480.0, 1_400.0] {
        area.with_host(|host| host.set_scroll_offset(Axis::Vertical, offset));
        area.on_scroll();
        clock.advance_millis(16);
        area.tick();
    }
    report("after wheel scrolling", &area.render());

    // Grab the thumb and pull it back to the top third of the track
    area.on_track_pointer_down(Axis::Vertical, Point::new(316.0, 400.0));
    for y in [320.0, 240.0, 160.0] {
        window.dispatch(&mut Event::pointer(event_types::POINTER_MOVE, 316.0, y));
        clock.advance_millis(16);
        area.tick();
    }
    window.dispatch(&mut Event::pointer(event_types::POINTER_UP, 316.0, 160.0));
    report("after drag", &area.render());

    // More rows arrive
    area.with_host(|host| host.set_content(Size::new(320.0, 3_840.0)));
    area.on_content_resize(Size::new(320.0, 3_840.0));
    report("after content growth", &area.render());

    clock.advance(area.config().auto_hide_delay());
    area.tick();
    report("after auto-hide", &area.render());

    area.unmount();
    tracing::info!(listeners = window.len(), "unmounted");
    Ok(())
}

fn report(label: &str, render: &ScrollAreaRender) {
    let vertical = render.track(Axis::Vertical);
    tracing::info!(
        label,
        classes = %render.classes.join(" "),
        thumb_percent = vertical.map(|t| t.thumb_size_percent),
        thumb_offset = vertical.map(|t| t.thumb_offset_px),
        revealed = vertical.map(|t| t.revealed),
        top_shadow = render.top_shadow.opacity,
        bottom_shadow = render.bottom_shadow.opacity,
        generation = render.generation,
    );
}
