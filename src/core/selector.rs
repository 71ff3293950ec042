use crate::models::media::{OutputKind, Rendition};

/// Picks exactly one rendition for the requested output kind, or `None`
/// when the listing has nothing suitable.
///
/// Video-with-audio: greatest height among renditions carrying both
/// streams; ties go to the earlier listing position. Audio-only: first
/// audio-only rendition in listing order.
pub fn select(renditions: &[Rendition], kind: OutputKind) -> Option<&Rendition> {
    match kind {
        OutputKind::AudioOnly => renditions.iter().find(|r| r.is_audio_only()),
        OutputKind::VideoWithAudio => {
            let mut best: Option<&Rendition> = None;
            for r in renditions.iter().filter(|r| r.is_progressive()) {
                match best {
                    // strict comparison keeps the first of equal heights
                    Some(b) if r.height <= b.height => {}
                    _ => best = Some(r),
                }
            }
            best
        }
    }
}
