//! Audio channel-layout inference.
//!
//! The registry stores audio as a flat, 1-indexed list of per-channel rows,
//! while probe reports describe streams with channel counts and optional
//! layout labels. This module walks the streams in order and expands them
//! into the registry's channel descriptors, recognizing 5.1 groups and
//! downmix stereo pairs along the way.

use serde_json::{json, Value};

use crate::probe::{ProbeReport, TrackKind};

/// Canonical 5.1 speaker roles, in registry channel order.
const ROLES_5_1: [&str; 6] = ["L", "R", "C", "LFE", "Ls", "Rs"];

/// One registry audio channel. `channel` is 1-based and contiguous across
/// the whole asset; order in the descriptor list is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioChannelDescriptor {
    pub channel: u32,
    /// Layout label, e.g. "5.1", "Stereo", "Mono".
    pub layout: String,
    /// Speaker role, e.g. "L", "Lt". Empty for true mono.
    pub role: String,
}

impl AudioChannelDescriptor {
    fn new(channel: u32, layout: &str, role: &str) -> Self {
        Self {
            channel,
            layout: layout.to_string(),
            role: role.to_string(),
        }
    }
}

/// Infer the asset-wide channel list from a probe report.
///
/// When at least one stream exposes a layout label, stream shapes are
/// interpreted (5.1 expansion, Lt/Rt stereo, six-mono 5.1 grouping);
/// without label evidence every stream is expanded to untagged mono.
/// Zero audio channels produce an empty list.
pub fn infer_channels(probe: &ProbeReport) -> Vec<AudioChannelDescriptor> {
    if probe.total_audio_channels() < 1 {
        return Vec::new();
    }
    // Labels kept aligned with stream positions; unlabeled streams get "".
    let streams: Vec<(u32, String)> = probe
        .tracks()
        .iter()
        .filter(|t| t.kind() == TrackKind::Audio)
        .map(|t| {
            let channels = t
                .field("Channels")
                .and_then(|c| c.parse().ok())
                .unwrap_or(0);
            let label = t.field("ChannelLayout").unwrap_or_default();
            (channels, label)
        })
        .collect();

    if streams.iter().all(|(_, label)| label.is_empty()) {
        expand_all_mono(&streams)
    } else {
        expand_labeled(&streams)
    }
}

/// Registry rows for the asset's channel list: one flat dict per channel.
pub fn registry_rows(asset_no: &str, channels: &[AudioChannelDescriptor]) -> Vec<Value> {
    channels
        .iter()
        .map(|ch| {
            json!({
                "master_no": asset_no,
                "audio_channel": ch.channel.to_string(),
                "audio_desc": ch.layout,
                "audio_desc2": if ch.role.is_empty() { Value::Null } else { Value::from(ch.role.clone()) },
            })
        })
        .collect()
}

fn expand_all_mono(streams: &[(u32, String)]) -> Vec<AudioChannelDescriptor> {
    let mut out = Vec::new();
    let mut index = 1;
    for (channels, _) in streams {
        push_mono_run(&mut out, &mut index, *channels);
    }
    out
}

fn expand_labeled(streams: &[(u32, String)]) -> Vec<AudioChannelDescriptor> {
    let mut out = Vec::new();
    let mut index = 1u32;
    let mut skip = 0usize;
    for (stream, (channels, label)) in streams.iter().enumerate() {
        if skip > 0 {
            skip -= 1;
            continue;
        }
        match *channels {
            6 => push_5_1(&mut out, &mut index),
            2 => {
                // Stereo pairs in this pipeline are downmix-encoded.
                out.push(AudioChannelDescriptor::new(index, "Stereo", "Lt"));
                out.push(AudioChannelDescriptor::new(index + 1, "Stereo", "Rt"));
                index += 2;
            }
            1 => {
                if is_split_5_1_group(streams, stream) {
                    push_5_1(&mut out, &mut index);
                    skip = 5;
                } else {
                    out.push(AudioChannelDescriptor::new(index, "Mono", label));
                    index += 1;
                }
            }
            n => push_mono_run(&mut out, &mut index, n),
        }
    }
    out
}

fn push_5_1(out: &mut Vec<AudioChannelDescriptor>, index: &mut u32) {
    for (offset, role) in ROLES_5_1.iter().enumerate() {
        out.push(AudioChannelDescriptor::new(*index + offset as u32, "5.1", role));
    }
    *index += 6;
}

fn push_mono_run(out: &mut Vec<AudioChannelDescriptor>, index: &mut u32, count: u32) {
    for _ in 0..count {
        out.push(AudioChannelDescriptor::new(*index, "Mono", ""));
        *index += 1;
    }
}

/// Six consecutive mono streams whose labels exactly match the canonical
/// 5.1 sequence are one discretely-encoded 5.1 set.
fn is_split_5_1_group(streams: &[(u32, String)], start: usize) -> bool {
    if streams.len() < start + ROLES_5_1.len() {
        return false;
    }
    streams[start..start + ROLES_5_1.len()]
        .iter()
        .zip(ROLES_5_1.iter())
        .all(|((channels, label), role)| *channels == 1 && label == role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn probe(tracks: Value) -> ProbeReport {
        ProbeReport::from_json("/mnt/media/show_ep101.mov", &json!({ "tracks": tracks })).unwrap()
    }

    fn roles(channels: &[AudioChannelDescriptor]) -> Vec<&str> {
        channels.iter().map(|c| c.role.as_str()).collect()
    }

    #[test]
    fn no_audio_is_an_empty_list() {
        let probe = probe(json!([{"@type": "Video", "Width": "1920"}]));
        assert!(infer_channels(&probe).is_empty());
    }

    #[test]
    fn six_channel_stream_expands_to_5_1_roles() {
        let probe = probe(json!([
            {"@type": "Audio", "Channels": "6", "ChannelLayout": "L R C LFE Ls Rs"},
        ]));
        let channels = infer_channels(&probe);
        assert_eq!(roles(&channels), vec!["L", "R", "C", "LFE", "Ls", "Rs"]);
        assert!(channels.iter().all(|c| c.layout == "5.1"));
    }

    #[test]
    fn surround_plus_stereo_downmix() {
        let probe = probe(json!([
            {"@type": "Audio", "Channels": "6", "ChannelLayout": "L R C LFE Ls Rs"},
            {"@type": "Audio", "Channels": "2", "ChannelLayout": "L R"},
        ]));
        let channels = infer_channels(&probe);
        assert_eq!(
            roles(&channels),
            vec!["L", "R", "C", "LFE", "Ls", "Rs", "Lt", "Rt"]
        );
        let indices: Vec<u32> = channels.iter().map(|c| c.channel).collect();
        assert_eq!(indices, (1..=8).collect::<Vec<u32>>());
        assert_eq!(channels[6].layout, "Stereo");
    }

    #[test]
    fn six_mono_streams_with_canonical_labels_group_as_5_1() {
        let probe = probe(json!([
            {"@type": "Audio", "Channels": "1", "ChannelLayout": "L"},
            {"@type": "Audio", "Channels": "1", "ChannelLayout": "R"},
            {"@type": "Audio", "Channels": "1", "ChannelLayout": "C"},
            {"@type": "Audio", "Channels": "1", "ChannelLayout": "LFE"},
            {"@type": "Audio", "Channels": "1", "ChannelLayout": "Ls"},
            {"@type": "Audio", "Channels": "1", "ChannelLayout": "Rs"},
        ]));
        let channels = infer_channels(&probe);
        assert_eq!(channels.len(), 6);
        assert!(channels.iter().all(|c| c.layout == "5.1"));
        assert_eq!(roles(&channels), vec!["L", "R", "C", "LFE", "Ls", "Rs"]);
    }

    #[test]
    fn labeled_mono_that_is_not_a_group_stays_mono() {
        let probe = probe(json!([
            {"@type": "Audio", "Channels": "1", "ChannelLayout": "C"},
            {"@type": "Audio", "Channels": "1", "ChannelLayout": "C"},
        ]));
        let channels = infer_channels(&probe);
        assert_eq!(channels.len(), 2);
        assert!(channels.iter().all(|c| c.layout == "Mono"));
        assert_eq!(roles(&channels), vec!["C", "C"]);
    }

    #[test]
    fn unlabeled_streams_never_infer_shapes() {
        let probe = probe(json!([
            {"@type": "Audio", "Channels": "6"},
            {"@type": "Audio", "Channels": "2"},
        ]));
        let channels = infer_channels(&probe);
        assert_eq!(channels.len(), 8);
        assert!(channels.iter().all(|c| c.layout == "Mono" && c.role.is_empty()));
    }

    #[test]
    fn odd_channel_counts_expand_to_untagged_mono() {
        let probe = probe(json!([
            {"@type": "Audio", "Channels": "8", "ChannelLayout": "L R C LFE Ls Rs Lb Rb"},
        ]));
        let channels = infer_channels(&probe);
        assert_eq!(channels.len(), 8);
        assert!(channels.iter().all(|c| c.layout == "Mono" && c.role.is_empty()));
    }

    #[test]
    fn registry_rows_shape() {
        let channels = vec![
            AudioChannelDescriptor::new(1, "Mono", ""),
            AudioChannelDescriptor::new(2, "Stereo", "Lt"),
        ];
        let rows = registry_rows("10045", &channels);
        assert_eq!(
            rows[0],
            json!({"master_no": "10045", "audio_channel": "1", "audio_desc": "Mono", "audio_desc2": null})
        );
        assert_eq!(rows[1]["audio_desc2"], json!("Lt"));
    }
}
