use reqwest::multipart;
use serde_json::Value;
use tracing::{info, warn};

use super::payload::OrderPayload;
use super::Error;
use crate::state::data::{Album, Item, Order, OrderStatus, Template};

/// Production endpoint root; overridable from the command line
pub const DEFAULT_SERVICE_URL: &str = "https://studio.codnix.com/creation";

/// HTTP client for the studio service endpoints
#[derive(Debug, Clone)]
pub struct StudioClient {
    http: reqwest::Client,
    base_url: String,
}

impl StudioClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// The underlying HTTP client, shared with the thumbnail loader
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Fetch the available video templates
    pub async fn fetch_templates(&self) -> Result<Vec<Template>, Error> {
        let value: Value = self
            .http
            .get(self.endpoint("services/getTemplates"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !status_ok(&value) {
            return Err(Error::Rejected(service_message(&value)));
        }

        let rows = value
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::Parse("template list is not an array".to_string()))?;

        rows.iter().map(parse_template).collect()
    }

    /// Fetch an album: its photobook id and images in server order
    pub async fn fetch_album(&self, code: &str) -> Result<Album, Error> {
        let value: Value = self
            .http
            .get(self.endpoint(&format!("ealbum/{code}.json")))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let photobook_id = text_field(&value, "Id")
            .ok_or_else(|| Error::Parse("album is missing its Id".to_string()))?;

        let mapping = value
            .get("ImagesServer")
            .and_then(Value::as_object)
            .ok_or_else(|| Error::Parse("album has no ImagesServer mapping".to_string()))?;

        // Mapping iteration order is the display order
        let mut items = Vec::with_capacity(mapping.len());
        for (position, (key, url)) in mapping.iter().enumerate() {
            let url = url
                .as_str()
                .ok_or_else(|| Error::Parse(format!("image \"{key}\" has a non-string URL")))?;
            items.push(Item {
                id: key.clone(),
                url: url.to_string(),
                title: format!("Image {key}"),
                index: position as u32 + 1,
            });
        }

        Ok(Album {
            photobook_id,
            items,
        })
    }

    /// Fetch past video orders for an album code
    ///
    /// A non-success status means the album has no orders yet, not a
    /// failure; the list is simply empty.
    pub async fn fetch_orders(&self, album_code: &str) -> Result<Vec<Order>, Error> {
        let value: Value = self
            .http
            .post(self.endpoint("services/getVideoOrders"))
            .form(&[("album_code", album_code)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !status_ok(&value) {
            info!(album_code, "order feed returned no rows");
            return Ok(Vec::new());
        }

        let rows = value
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::Parse("order list is not an array".to_string()))?;

        rows.iter().map(parse_order).collect()
    }

    /// Submit a video order; returns the service's confirmation message
    pub async fn submit_order(&self, payload: &OrderPayload) -> Result<String, Error> {
        let form = multipart::Form::new()
            .text("template_id", payload.template_id.clone())
            .text("album_code", payload.album_code.clone())
            .text("photobook_id", payload.photobook_id.clone())
            .text("user_name", payload.user_name.clone())
            .text("user_email", payload.user_email.clone())
            .text("user_phone", payload.user_phone.clone())
            .text("selected_images", payload.selected_images.clone());

        let value: Value = self
            .http
            .post(self.endpoint("services/saveTemplateOrder"))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if status_ok(&value) {
            Ok(value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Template Order Saved Successfully")
                .to_string())
        } else {
            Err(Error::Rejected(service_message(&value)))
        }
    }
}

/// The service flags success as status "1" or 1 depending on the endpoint
fn status_ok(value: &Value) -> bool {
    match value.get("status") {
        Some(Value::String(s)) => s == "1",
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        _ => false,
    }
}

fn service_message(value: &Value) -> String {
    value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("The service rejected the request.")
        .to_string()
}

/// Read a field that arrives as a string or a number
fn text_field(row: &Value, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Like `text_field`, but empty strings count as absent
fn non_empty_field(row: &Value, key: &str) -> Option<String> {
    text_field(row, key).filter(|s| !s.is_empty())
}

/// Read a count that arrives as "2", 2 or null
fn count_field(row: &Value, key: &str) -> Option<u32> {
    match row.get(key)? {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        _ => None,
    }
}

fn parse_template(row: &Value) -> Result<Template, Error> {
    let template_id = text_field(row, "template_id")
        .ok_or_else(|| Error::Parse("template row is missing template_id".to_string()))?;
    let name = text_field(row, "name")
        .ok_or_else(|| Error::Parse(format!("template {template_id} has no name")))?;

    Ok(Template {
        template_id,
        name,
        folder_prefix: text_field(row, "folder_prefix").unwrap_or_default(),
        required_images: count_field(row, "required_images"),
        thumb_url: non_empty_field(row, "thumb_url"),
        gif_url: non_empty_field(row, "gif_url"),
        status: text_field(row, "status").unwrap_or_default(),
        createdon: text_field(row, "createdon").unwrap_or_default(),
    })
}

fn parse_order(row: &Value) -> Result<Order, Error> {
    let order_id = match row.get("order_id") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| Error::Parse("order row is missing order_id".to_string()))?;

    // A corrupt image list is not worth losing the whole order over
    let selected_images = match text_field(row, "selected_images") {
        Some(raw) if !raw.is_empty() => match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(urls) => urls,
            Err(err) => {
                warn!(order_id, %err, "unparseable selected_images, keeping order without them");
                Vec::new()
            }
        },
        _ => Vec::new(),
    };

    let flag = text_field(row, "is_order_done").unwrap_or_else(|| "N".to_string());

    Ok(Order {
        order_id,
        template_id: text_field(row, "template_id").unwrap_or_default(),
        album_code: text_field(row, "album_code").unwrap_or_default(),
        photobook_id: text_field(row, "photobook_id").unwrap_or_default(),
        selected_images,
        user_name: text_field(row, "user_name").unwrap_or_default(),
        user_email: text_field(row, "user_email").unwrap_or_default(),
        user_phone: text_field(row, "user_phone").unwrap_or_default(),
        createdon: text_field(row, "createdon").unwrap_or_default(),
        status: OrderStatus::from_flag(&flag),
        order_done_on: non_empty_field(row, "order_done_on"),
        video_url: non_empty_field(row, "video_url"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_fetch_templates_normalizes_required_images() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/services/getTemplates")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"status":"1","data":[
                    {"template_id":"3","name":"Template3","folder_prefix":"003_WEDDING","required_images":"2","thumb_url":"https://cdn/th.png","status":"Y","createdon":"2025-04-14 06:22:17"},
                    {"template_id":4,"name":"Template4","required_images":5},
                    {"template_id":"7","name":"Template7","required_images":null,"thumb_url":""}
                ]}"#,
            )
            .create_async()
            .await;

        let client = StudioClient::new(server.url());
        let templates = client.fetch_templates().await.unwrap();

        assert_eq!(templates.len(), 3);
        assert_eq!(templates[0].template_id, "3");
        assert_eq!(templates[0].required_images, Some(2));
        assert_eq!(templates[0].thumb_url.as_deref(), Some("https://cdn/th.png"));
        assert_eq!(templates[1].template_id, "4");
        assert_eq!(templates[1].required_images, Some(5));
        assert_eq!(templates[2].required_images, None);
        assert_eq!(templates[2].thumb_url, None);
        assert_eq!(templates[2].max_selected(), 2);
    }

    #[tokio::test]
    async fn test_fetch_templates_rejected_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/services/getTemplates")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"0","message":"Service unavailable"}"#)
            .create_async()
            .await;

        let client = StudioClient::new(server.url());
        let err = client.fetch_templates().await.unwrap_err();
        assert!(matches!(err, Error::Rejected(msg) if msg == "Service unavailable"));
    }

    #[tokio::test]
    async fn test_fetch_album_preserves_mapping_order() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/ealbum/282853GMQB.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"Id":"282853GMQB","ImagesServer":{
                    "12":"https://cdn/12.jpg",
                    "3":"https://cdn/3.jpg",
                    "7":"https://cdn/7.jpg"
                }}"#,
            )
            .create_async()
            .await;

        let client = StudioClient::new(server.url());
        let album = client.fetch_album("282853GMQB").await.unwrap();

        assert_eq!(album.photobook_id, "282853GMQB");
        let ids: Vec<&str> = album.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["12", "3", "7"]);
        assert_eq!(album.items[0].index, 1);
        assert_eq!(album.items[2].index, 3);
        assert_eq!(album.items[1].title, "Image 3");
        assert_eq!(album.items[1].url, "https://cdn/3.jpg");
    }

    #[tokio::test]
    async fn test_fetch_album_without_id_is_a_parse_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/ealbum/BAD.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ImagesServer":{}}"#)
            .create_async()
            .await;

        let client = StudioClient::new(server.url());
        let err = client.fetch_album("BAD").await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_orders_parses_rows_and_flags() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/services/getVideoOrders")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"status":"1","data":[
                    {"order_id":41,"template_id":"3","album_code":"282853GMQB","photobook_id":"282853",
                     "selected_images":"[\"https://cdn/3.jpg\",\"https://cdn/7.jpg\"]",
                     "user_name":"Asha","user_email":"asha@example.com","user_phone":"9876543210",
                     "createdon":"2025-04-14 06:22:17","is_order_done":"Y",
                     "order_done_on":"2025-04-14 07:00:00","video_url":"https://cdn/v41.mp4"},
                    {"order_id":"42","is_order_done":"E","selected_images":"not json"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = StudioClient::new(server.url());
        let orders = client.fetch_orders("282853GMQB").await.unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].order_id, 41);
        assert_eq!(orders[0].status, OrderStatus::Complete);
        assert_eq!(orders[0].selected_images.len(), 2);
        assert_eq!(orders[0].video_url.as_deref(), Some("https://cdn/v41.mp4"));

        // Corrupt image list degrades to empty, the order itself survives
        assert_eq!(orders[1].order_id, 42);
        assert_eq!(orders[1].status, OrderStatus::Error);
        assert!(orders[1].selected_images.is_empty());
        assert!(orders[1].video_url.is_none());
    }

    #[tokio::test]
    async fn test_fetch_orders_non_success_status_is_empty() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/services/getVideoOrders")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"0","data":[]}"#)
            .create_async()
            .await;

        let client = StudioClient::new(server.url());
        let orders = client.fetch_orders("EMPTY").await.unwrap();
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn test_submit_order_accepts_numeric_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/services/saveTemplateOrder")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":1,"message":"Template Order Saved Successfully"}"#)
            .create_async()
            .await;

        let client = StudioClient::new(server.url());
        let payload = OrderPayload {
            template_id: "3".to_string(),
            album_code: "282853GMQB".to_string(),
            photobook_id: "282853".to_string(),
            user_name: "Asha".to_string(),
            user_email: "asha@example.com".to_string(),
            user_phone: "9876543210".to_string(),
            selected_images: r#"["https://cdn/3.jpg","https://cdn/7.jpg"]"#.to_string(),
        };

        let message = client.submit_order(&payload).await.unwrap();
        assert_eq!(message, "Template Order Saved Successfully");
    }

    #[tokio::test]
    async fn test_submit_order_surfaces_service_message() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/services/saveTemplateOrder")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"0","message":"Album is locked"}"#)
            .create_async()
            .await;

        let client = StudioClient::new(server.url());
        let payload = OrderPayload {
            template_id: "3".to_string(),
            album_code: "X".to_string(),
            photobook_id: "X".to_string(),
            user_name: "Asha".to_string(),
            user_email: "asha@example.com".to_string(),
            user_phone: "9876543210".to_string(),
            selected_images: "[]".to_string(),
        };

        let err = client.submit_order(&payload).await.unwrap_err();
        assert!(matches!(err, Error::Rejected(msg) if msg == "Album is locked"));
    }
}
