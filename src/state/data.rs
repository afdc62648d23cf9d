/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the API boundary, the local store, and the UI layer.
use serde::{Deserialize, Serialize};

/// How many images a template requires when the service does not say
pub const DEFAULT_REQUIRED_IMAGES: u32 = 2;

/// A single image inside the current album
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Opaque key, unique within the album
    pub id: String,
    /// Absolute URL of the image on the content server
    pub url: String,
    /// Display title (e.g. "Image 12")
    pub title: String,
    /// 1-based display order, assigned in album iteration order
    pub index: u32,
}

/// A video-production preset offered by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub template_id: String,
    pub name: String,
    pub folder_prefix: String,
    /// How many images this template needs; None means the service left it out
    pub required_images: Option<u32>,
    pub thumb_url: Option<String>,
    pub gif_url: Option<String>,
    pub status: String,
    pub createdon: String,
}

impl Template {
    /// The selection bound derived from this template
    pub fn max_selected(&self) -> usize {
        self.required_images.unwrap_or(DEFAULT_REQUIRED_IMAGES) as usize
    }

    /// Effect name derived from the folder prefix (e.g. "003_WEDDING" -> "wedding")
    pub fn effect(&self) -> String {
        self.folder_prefix
            .split('_')
            .nth(1)
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|| "fade".to_string())
    }
}

/// One customer album fetched from the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    /// Opaque secondary identifier, forwarded verbatim on submission
    pub photobook_id: String,
    /// Images in album iteration order
    pub items: Vec<Item>,
}

impl Album {
    /// Look up an item by its id
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.item(id).is_some()
    }
}

/// Contact details entered before submitting an order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub whatsapp: String,
    pub email: String,
}

/// Lifecycle of a submitted video order, mapped from the service's
/// single-letter flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Processing,
    Complete,
    Error,
    Unknown,
}

impl OrderStatus {
    /// Map the service flag ("N"/"P"/"Y"/"E") to a status
    pub fn from_flag(flag: &str) -> Self {
        match flag {
            "N" => OrderStatus::Pending,
            "P" => OrderStatus::Processing,
            "Y" => OrderStatus::Complete,
            "E" => OrderStatus::Error,
            _ => OrderStatus::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Complete => "Complete",
            OrderStatus::Error => "Error",
            OrderStatus::Unknown => "Unknown",
        }
    }

    /// Only failed orders offer the manual re-submit affordance
    pub fn is_retryable(self) -> bool {
        matches!(self, OrderStatus::Error)
    }
}

/// A previously submitted order, as returned by the order-history feed
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: i64,
    pub template_id: String,
    pub album_code: String,
    pub photobook_id: String,
    /// Ordered image URLs the order was created with
    pub selected_images: Vec<String>,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub createdon: String,
    pub status: OrderStatus,
    pub order_done_on: Option<String>,
    pub video_url: Option<String>,
}

impl Order {
    pub fn title(&self) -> String {
        format!("Video {}", self.order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_flag() {
        assert_eq!(OrderStatus::from_flag("Y"), OrderStatus::Complete);
        assert_eq!(OrderStatus::from_flag("N"), OrderStatus::Pending);
        assert_eq!(OrderStatus::from_flag("P"), OrderStatus::Processing);
        assert_eq!(OrderStatus::from_flag("E"), OrderStatus::Error);
        assert_eq!(OrderStatus::from_flag(""), OrderStatus::Unknown);
        assert_eq!(OrderStatus::from_flag("X"), OrderStatus::Unknown);
    }

    #[test]
    fn test_template_max_selected_defaults_to_two() {
        let mut template = Template {
            template_id: "3".to_string(),
            name: "Template3".to_string(),
            folder_prefix: "003_WEDDING".to_string(),
            required_images: None,
            thumb_url: None,
            gif_url: None,
            status: "Y".to_string(),
            createdon: "2025-04-14 06:22:17".to_string(),
        };
        assert_eq!(template.max_selected(), 2);

        template.required_images = Some(5);
        assert_eq!(template.max_selected(), 5);
    }

    #[test]
    fn test_template_effect_from_folder_prefix() {
        let template = Template {
            template_id: "3".to_string(),
            name: "Template3".to_string(),
            folder_prefix: "003_WEDDING".to_string(),
            required_images: Some(2),
            thumb_url: None,
            gif_url: None,
            status: "Y".to_string(),
            createdon: String::new(),
        };
        assert_eq!(template.effect(), "wedding");
    }
}
