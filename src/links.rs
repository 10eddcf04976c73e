use crate::pack::CommentBox;

/// Links visible at the current geometry: unordered box pairs plus, when an
/// anchor is shown, boxes linked to the world origin.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkSet {
    pub pairs: Vec<(usize, usize)>,
    pub anchor: Vec<usize>,
}

/// Recompute the link set from the current box positions. Pure: the same
/// boxes and threshold always produce the same links.
pub fn select_links(boxes: &[CommentBox], link_threshold: f32, include_anchor: bool) -> LinkSet {
    let centers: Vec<_> = boxes.iter().map(CommentBox::center).collect();

    let mut pairs = Vec::new();
    for i in 0..centers.len() {
        for j in (i + 1)..centers.len() {
            if (centers[i] - centers[j]).length() < link_threshold {
                pairs.push((i, j));
            }
        }
    }

    let anchor = if include_anchor {
        centers
            .iter()
            .enumerate()
            .filter(|(_, center)| center.length() < link_threshold)
            .map(|(index, _)| index)
            .collect()
    } else {
        Vec::new()
    };

    LinkSet { pairs, anchor }
}
