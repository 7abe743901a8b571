use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use image::{Rgba, RgbaImage};
use loteria_display::catalog::Catalog;
use loteria_display::events::{Command, DisplayMode};
use loteria_display::render::frame::FrameComposer;
use loteria_display::session::Session;
use tempfile::tempdir;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

const BG: Rgba<u8> = Rgba([18, 18, 18, 255]);
const TEXT: Rgba<u8> = Rgba([230, 230, 230, 255]);
const CARD: Rgba<u8> = Rgba([200, 40, 40, 255]);

// Resampling a flat colour may drift by one step of fixed-point rounding.
fn is_card(px: &Rgba<u8>) -> bool {
    px.0.iter().zip(CARD.0).all(|(got, want)| got.abs_diff(want) <= 1)
}

#[test]
fn tall_card_is_padded_and_centered() {
    let tmp = tempdir().unwrap();
    RgbaImage::from_pixel(100, 200, CARD)
        .save(tmp.path().join("el_catrin.png"))
        .unwrap();
    let session = Session::new(
        Catalog::load(tmp.path()).unwrap(),
        Some(1),
        DisplayMode::Windowed,
    );

    let mut composer = FrameComposer::new(BG, TEXT, 40, None);
    let frame = composer.compose(&session, 900, 600);
    assert_eq!(frame.dimensions(), (900, 600));

    // 100x200 fitted into 820x520 is 260x520, placed at (320, 40).
    assert!(is_card(frame.get_pixel(450, 300)));
    assert!(is_card(frame.get_pixel(321, 41)));
    assert_eq!(*frame.get_pixel(318, 300), BG);
    assert_eq!(*frame.get_pixel(581, 300), BG);
    assert_eq!(*frame.get_pixel(450, 38), BG);
    assert_eq!(*frame.get_pixel(450, 561), BG);
}

#[test]
fn broken_card_leaves_blank_frame() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("roto.png"), b"not a png").unwrap();
    let mut session = Session::new(
        Catalog::load(tmp.path()).unwrap(),
        None,
        DisplayMode::Windowed,
    );

    let mut composer = FrameComposer::new(BG, TEXT, 40, None);
    let frame = composer.compose(&session, 320, 240);
    assert!(frame.pixels().all(|p| *p == BG));

    // The loop keeps going: later frames still compose.
    session.apply(Command::Reset);
    let frame = composer.compose(&session, 64, 48);
    assert_eq!(frame.dimensions(), (64, 48));
}

struct WarnCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }
}

#[test]
fn broken_card_warns_once_across_frames() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("roto.png"), b"garbage bytes").unwrap();
    let session = Session::new(
        Catalog::load(tmp.path()).unwrap(),
        None,
        DisplayMode::Windowed,
    );

    let warns = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(WarnCounter(Arc::clone(&warns)));
    tracing::subscriber::with_default(subscriber, || {
        let mut composer = FrameComposer::new(BG, TEXT, 40, None);
        for _ in 0..60 {
            composer.compose(&session, 160, 120);
        }
    });
    assert_eq!(warns.load(Ordering::Relaxed), 1);
}

#[test]
fn tiny_window_still_composes() {
    let tmp = tempdir().unwrap();
    RgbaImage::from_pixel(50, 50, CARD)
        .save(tmp.path().join("la_rosa.png"))
        .unwrap();
    let session = Session::new(
        Catalog::load(tmp.path()).unwrap(),
        None,
        DisplayMode::Windowed,
    );
    let mut composer = FrameComposer::new(BG, TEXT, 40, None);
    let frame = composer.compose(&session, 50, 50);
    // Padding swallows the viewport; the card shrinks to 1px at the center.
    assert!(is_card(frame.get_pixel(24, 24)));
    assert_eq!(*frame.get_pixel(0, 0), BG);
}
