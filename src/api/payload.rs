use super::Error;
use crate::state::data::{Album, ContactDetails, Order};

/// Orders below this many images are rejected before any network call
pub const MIN_SELECTED_IMAGES: usize = 2;

/// Everything the order-save endpoint needs, assembled and validated
///
/// `selected_images` carries the ordered URL list JSON-encoded as a single
/// string, which is how the service expects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPayload {
    pub template_id: String,
    pub album_code: String,
    pub photobook_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub selected_images: String,
}

impl OrderPayload {
    /// Assemble a payload from the current selection
    ///
    /// Fails before any network call when fewer than two or more than
    /// `max_selected` images are picked, or when a selected id has no
    /// backing item in the album; a stale id aborts the submission rather
    /// than silently dropping an entry, since the service receives the
    /// images in order.
    pub fn build(
        template_id: &str,
        album_code: &str,
        album: &Album,
        contact: &ContactDetails,
        selected: &[String],
        max_selected: usize,
    ) -> Result<Self, Error> {
        if selected.len() < MIN_SELECTED_IMAGES {
            return Err(Error::TooFewImages {
                count: selected.len(),
                min: MIN_SELECTED_IMAGES,
            });
        }
        if selected.len() > max_selected {
            return Err(Error::TooManyImages {
                count: selected.len(),
                max: max_selected,
            });
        }

        let mut urls = Vec::with_capacity(selected.len());
        for id in selected {
            let item = album
                .item(id)
                .ok_or_else(|| Error::MissingItem { id: id.clone() })?;
            urls.push(item.url.as_str());
        }

        Ok(Self {
            template_id: template_id.to_string(),
            album_code: album_code.to_string(),
            photobook_id: album.photobook_id.clone(),
            user_name: contact.name.clone(),
            user_email: contact.email.clone(),
            user_phone: contact.whatsapp.clone(),
            selected_images: serde_json::to_string(&urls)?,
        })
    }

    /// Re-assemble the payload of a stored order for a manual re-submit
    ///
    /// The stored contact fields and image URLs are reused verbatim, so the
    /// user does not re-enter anything. An order whose image list did not
    /// survive parsing fails the same minimum rule as a fresh submission.
    pub fn from_order(order: &Order) -> Result<Self, Error> {
        if order.selected_images.len() < MIN_SELECTED_IMAGES {
            return Err(Error::TooFewImages {
                count: order.selected_images.len(),
                min: MIN_SELECTED_IMAGES,
            });
        }

        Ok(Self {
            template_id: order.template_id.clone(),
            album_code: order.album_code.clone(),
            photobook_id: order.photobook_id.clone(),
            user_name: order.user_name.clone(),
            user_email: order.user_email.clone(),
            user_phone: order.user_phone.clone(),
            selected_images: serde_json::to_string(&order.selected_images)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{Item, OrderStatus};

    fn album() -> Album {
        let items = ["3", "7", "12"]
            .iter()
            .enumerate()
            .map(|(i, key)| Item {
                id: key.to_string(),
                url: format!("https://cdn/{key}.jpg"),
                title: format!("Image {key}"),
                index: i as u32 + 1,
            })
            .collect();
        Album {
            photobook_id: "282853".to_string(),
            items,
        }
    }

    fn contact() -> ContactDetails {
        ContactDetails {
            name: "Asha Rao".to_string(),
            whatsapp: "9876543210".to_string(),
            email: "asha@example.com".to_string(),
        }
    }

    #[test]
    fn test_build_encodes_urls_in_selection_order() {
        let selected = vec!["7".to_string(), "3".to_string()];
        let payload =
            OrderPayload::build("3", "282853GMQB", &album(), &contact(), &selected, 2).unwrap();

        assert_eq!(payload.photobook_id, "282853");
        assert_eq!(payload.user_phone, "9876543210");
        assert_eq!(
            payload.selected_images,
            r#"["https://cdn/7.jpg","https://cdn/3.jpg"]"#
        );
    }

    #[test]
    fn test_build_rejects_too_few_images() {
        let selected = vec!["3".to_string()];
        let err =
            OrderPayload::build("3", "282853GMQB", &album(), &contact(), &selected, 2).unwrap_err();
        assert!(matches!(err, Error::TooFewImages { count: 1, min: 2 }));
    }

    #[test]
    fn test_build_rejects_too_many_images() {
        let selected = vec!["3".to_string(), "7".to_string(), "12".to_string()];
        let err =
            OrderPayload::build("3", "282853GMQB", &album(), &contact(), &selected, 2).unwrap_err();
        assert!(matches!(err, Error::TooManyImages { count: 3, max: 2 }));
    }

    #[test]
    fn test_build_aborts_on_stale_id() {
        let selected = vec!["3".to_string(), "zzz".to_string()];
        let err =
            OrderPayload::build("3", "282853GMQB", &album(), &contact(), &selected, 2).unwrap_err();
        assert!(matches!(err, Error::MissingItem { id } if id == "zzz"));
    }

    #[test]
    fn test_from_order_reuses_stored_fields() {
        let order = Order {
            order_id: 41,
            template_id: "3".to_string(),
            album_code: "282853GMQB".to_string(),
            photobook_id: "282853".to_string(),
            selected_images: vec![
                "https://cdn/3.jpg".to_string(),
                "https://cdn/7.jpg".to_string(),
            ],
            user_name: "Asha".to_string(),
            user_email: "asha@example.com".to_string(),
            user_phone: "9876543210".to_string(),
            createdon: "2025-04-14 06:22:17".to_string(),
            status: OrderStatus::Error,
            order_done_on: None,
            video_url: None,
        };

        let payload = OrderPayload::from_order(&order).unwrap();
        assert_eq!(payload.album_code, "282853GMQB");
        assert_eq!(
            payload.selected_images,
            r#"["https://cdn/3.jpg","https://cdn/7.jpg"]"#
        );
    }

    #[test]
    fn test_from_order_with_lost_images_fails_minimum() {
        let order = Order {
            order_id: 42,
            template_id: "3".to_string(),
            album_code: "282853GMQB".to_string(),
            photobook_id: "282853".to_string(),
            selected_images: Vec::new(),
            user_name: String::new(),
            user_email: String::new(),
            user_phone: String::new(),
            createdon: String::new(),
            status: OrderStatus::Error,
            order_done_on: None,
            video_url: None,
        };

        let err = OrderPayload::from_order(&order).unwrap_err();
        assert!(matches!(err, Error::TooFewImages { count: 0, min: 2 }));
    }
}
