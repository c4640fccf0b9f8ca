use midly::{
    num::{u15, u24, u28, u4, u7},
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind,
};

pub fn meta(delta: u32, message: MetaMessage<'static>) -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::from(delta),
        kind: TrackEventKind::Meta(message),
    }
}

pub fn note_on(delta: u32, key: u8) -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::from(delta),
        kind: TrackEventKind::Midi {
            channel: u4::from(0),
            message: MidiMessage::NoteOn {
                key: u7::from(key),
                vel: u7::from(100),
            },
        },
    }
}

pub fn note_off(delta: u32, key: u8) -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::from(delta),
        kind: TrackEventKind::Midi {
            channel: u4::from(0),
            message: MidiMessage::NoteOff {
                key: u7::from(key),
                vel: u7::from(0),
            },
        },
    }
}

/// A two track file with five text fields:
///
/// | track | event | field |
/// |-------|-------|-------|
/// | 0     | 0     | track name `caf\xe9` (Latin-1) |
/// | 0     | 2     | copyright `(c) 1999` |
/// | 1     | 0     | track name `Piano` |
/// | 1     | 2     | lyric `la\rla` |
/// | 1     | 4     | marker `verse` |
pub fn sample_smf() -> Smf<'static> {
    Smf {
        header: Header::new(Format::Parallel, Timing::Metrical(u15::from(480))),
        tracks: vec![
            vec![
                meta(0, MetaMessage::TrackName(b"caf\xe9")),
                meta(0, MetaMessage::Tempo(u24::from(500_000))),
                meta(0, MetaMessage::Copyright(b"(c) 1999")),
                meta(0, MetaMessage::EndOfTrack),
            ],
            vec![
                meta(0, MetaMessage::TrackName(b"Piano")),
                note_on(0, 60),
                meta(0, MetaMessage::Lyric(b"la\rla")),
                note_off(480, 60),
                meta(0, MetaMessage::Marker(b"verse")),
                meta(0, MetaMessage::EndOfTrack),
            ],
        ],
    }
}

pub fn smf_bytes(smf: &Smf) -> Vec<u8> {
    let mut bytes = Vec::new();
    smf.write_std(&mut bytes).unwrap();
    bytes
}
