//! Scripted sheet session
//!
//! Plays the host's role: feeds frames, touches and back presses to a sheet
//! and routes unconsumed back presses to the back-handler registry.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::{bail, Result};
use clap::ValueEnum;
use tracing::{debug, info};

use bottom_sheet::{
    BackDispatch, BackHandlerRegistry, BottomSheet, BottomSheetBuilder, HostEvent,
    SheetConfig, SheetState, TouchEvent,
};
use sheet_core::Size;

const VIEWPORT: Size = Size::new(390.0, 844.0);
const MAX_FRAMES: u32 = 10_000;
const DRAG_STEPS: u32 = 8;

/// How the session closes a sheet that is still open after the drag
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Dismissal {
    /// Programmatic close
    Close,
    /// Hardware back button
    Back,
    /// Tap above the panel
    Tap,
}

pub struct SessionOptions {
    pub drag: f32,
    pub dismissal: Dismissal,
    pub frame_ms: f32,
}

#[derive(Debug)]
pub struct SessionSummary {
    pub frames: u32,
    pub closes: u32,
    pub final_state: SheetState,
}

struct Host {
    sheet: BottomSheet<&'static str>,
    back_handlers: BackHandlerRegistry,
    frame_ms: f32,
    frames: u32,
}

impl Host {
    fn run_frames(&mut self) -> Result<()> {
        while self.sheet.handle_event(&HostEvent::Frame {
            dt_ms: self.frame_ms,
        }) {
            self.frames += 1;
            if self.frames > MAX_FRAMES {
                bail!("Animations did not settle after {} frames", MAX_FRAMES);
            }
        }
        self.log_frame();
        Ok(())
    }

    fn log_frame(&self) {
        match self.sheet.frame() {
            Some(frame) => info!(
                "{:?}: panel at y={:.1} h={:.1}, backdrop {}",
                self.sheet.state(),
                frame.layout.panel.rect.y(),
                frame.layout.panel.rect.height(),
                frame.layout.backdrop.to_hex_string()
            ),
            None => info!("{:?}: nothing rendered", self.sheet.state()),
        }
    }

    fn touch(&self, event: TouchEvent) -> bool {
        self.sheet.handle_event(&HostEvent::Touch(event))
    }

    /// Deliver a back press the way a host would
    fn back_press(&self) -> BackDispatch {
        if self.sheet.handle_event(&HostEvent::BackPressed) {
            return BackDispatch::Handled;
        }
        self.back_handlers.dispatch()
    }

    fn drag(&mut self, distance: f32) -> Result<()> {
        let Some(layout) = self.sheet.layout() else {
            bail!("Sheet is not visible");
        };
        let x = layout.panel.rect.x() + layout.panel.rect.width() / 2.0;
        let start_y = layout.panel.rect.y() + 20.0;

        if !self.touch(TouchEvent::Started { id: 1, x, y: start_y }) {
            bail!("Panel did not accept the touch at ({:.1}, {:.1})", x, start_y);
        }
        for step in 1..=DRAG_STEPS {
            let y = start_y + distance * step as f32 / DRAG_STEPS as f32;
            self.touch(TouchEvent::Moved { id: 1, x, y });
            debug!("Drag at y={:.1}, pan {:?}", y, self.sheet.pan());
        }
        self.touch(TouchEvent::Ended {
            id: 1,
            x,
            y: start_y + distance,
        });
        info!(
            "Released drag of {:.1}px (threshold {:.1})",
            distance,
            self.sheet.config().dismiss_threshold()
        );
        self.run_frames()
    }

    fn dismiss(&mut self, dismissal: Dismissal) -> Result<()> {
        match dismissal {
            Dismissal::Close => self.sheet.close(),
            Dismissal::Back => {
                let result = self.back_press();
                info!("Back press: {:?}", result);
            }
            Dismissal::Tap => {
                let accepted = self.touch(TouchEvent::Started { id: 2, x: 10.0, y: 10.0 })
                    && self.touch(TouchEvent::Ended { id: 2, x: 10.0, y: 10.0 });
                if !accepted {
                    info!("Tap above the sheet fell through to the host");
                }
            }
        }
        self.run_frames()
    }
}

fn build_sheet(
    config: SheetConfig,
    registry: &BackHandlerRegistry,
    closes: &Rc<Cell<u32>>,
) -> BottomSheet<&'static str> {
    let closes = Rc::clone(closes);
    BottomSheetBuilder::from_config(config)
        .back_handlers(registry.clone())
        .viewport(VIEWPORT)
        .on_close(move || {
            closes.set(closes.get() + 1);
            info!("on_close fired");
        })
        .content("Demo content")
        .build()
}

/// Run one show, drag, dismiss session
pub fn run(config: SheetConfig, options: SessionOptions) -> Result<SessionSummary> {
    if options.frame_ms.is_nan() || options.frame_ms <= 0.0 {
        bail!("Frame interval must be positive, got {}", options.frame_ms);
    }

    let registry = BackHandlerRegistry::new();
    let closes = Rc::new(Cell::new(0));
    let mut host = Host {
        sheet: build_sheet(config, &registry, &closes),
        back_handlers: registry,
        frame_ms: options.frame_ms,
        frames: 0,
    };

    info!(
        "Showing {:?} sheet, height {}",
        host.sheet.config().presentation(),
        host.sheet.config().height
    );
    host.sheet.show();
    host.run_frames()?;

    host.drag(options.drag)?;

    if host.sheet.is_visible() {
        host.dismiss(options.dismissal)?;
    }

    // Nothing the sheet registered may outlive it
    if !host.sheet.is_visible() && !host.back_handlers.is_empty() {
        bail!("Back handler still registered after close");
    }

    Ok(SessionSummary {
        frames: host.frames,
        closes: closes.get(),
        final_state: host.sheet.state(),
    })
}
