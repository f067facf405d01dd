//! Video lesson placeholders
//!
//! Lesson cards carry a placeholder where the player will go. Until real
//! sources exist, clicking one announces which lesson it is.

use crate::dom::Dom;
use crate::notify::{NotificationKind, Notifier};
use crate::types::NodeId;

pub const DEFAULT_VIDEO_TITLE: &str = "Video Lesson";

/// Title shown for a placeholder: the raw text of the element that follows
/// it, or the default when there is none or it is empty.
pub fn video_title(next_sibling_text: Option<&str>) -> String {
    match next_sibling_text {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => DEFAULT_VIDEO_TITLE.to_string(),
    }
}

pub fn video_message(title: &str) -> String {
    format!(
        "Video: \"{}\" - Video player would open here. Add your video source when ready!",
        title
    )
}

/// Handle a click on `placeholder`.
pub fn open_placeholder(dom: &dyn Dom, notifier: &Notifier, placeholder: NodeId) -> String {
    let title = video_title(dom.next_sibling_text(placeholder).as_deref());
    notifier.notify(&video_message(&title), NotificationKind::Success);
    title
}
