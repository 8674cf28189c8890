use crate::taxonomy::{contains_term, MentionGroup, MentionKind, MENTION_GROUPS};

#[derive(Debug, Clone)]
pub struct MentionHit {
    pub group: &'static MentionGroup,
    pub names: Vec<&'static str>,
}

/// Finds every mention group named in the title, description or channel.
/// Hits keep taxonomy order.
pub fn detect_mentions(title: &str, description: &str, channel: &str) -> Vec<MentionHit> {
    let haystack = format!("{} {} {}", title, description, channel).to_lowercase();

    MENTION_GROUPS
        .iter()
        .filter_map(|group| {
            let names: Vec<&'static str> = group
                .names
                .iter()
                .copied()
                .filter(|name| contains_term(&haystack, name))
                .collect();
            if names.is_empty() {
                None
            } else {
                Some(MentionHit { group, names })
            }
        })
        .collect()
}

pub fn summarize_mentions(hits: &[MentionHit]) -> String {
    match hits {
        [] => "Primary platform only".to_string(),
        [single] => single_group_summary(single),
        _ => {
            // Two strongest groups; ties keep taxonomy order.
            let mut ranked: Vec<&MentionHit> = hits.iter().collect();
            ranked.sort_by(|a, b| b.names.len().cmp(&a.names.len()));
            format!("{} + {}", ranked[0].group.label(), ranked[1].group.label())
        }
    }
}

fn single_group_summary(hit: &MentionHit) -> String {
    let count = hit.names.len();
    match hit.group.kind {
        MentionKind::Regional { region } => {
            let noun = if count == 1 { "outlet" } else { "outlets" };
            format!("{} {} {}", count, region, noun)
        }
        MentionKind::Social => hit.names.join(" + "),
    }
}
