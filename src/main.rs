use clap::Parser;
use iced::widget::image::Handle;
use iced::widget::{button, column, horizontal_rule, horizontal_space, row, scrollable, text, Column};
use iced::{Alignment, Element, Length, Task, Theme};
use std::collections::{HashMap, HashSet};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod state;
mod ui;

use api::client::DEFAULT_SERVICE_URL;
use api::payload::{OrderPayload, MIN_SELECTED_IMAGES};
use api::StudioClient;
use state::data::{Album, ContactDetails, Order, OrderStatus, Template, DEFAULT_REQUIRED_IMAGES};
use state::pagination::{page, PageWindow};
use state::reorder::ReorderDraft;
use state::selection::{SelectionMode, SelectionState};
use state::store::Store;

/// Grid page size, matching the web gallery
const IMAGES_PER_PAGE: usize = 20;
/// Order-list page size
const ORDERS_PER_PAGE: usize = 6;
/// How many recent album codes to offer as quick picks
const RECENT_ALBUM_LIMIT: usize = 5;

/// Desktop client for the template-video studio service
#[derive(Debug, Parser)]
#[command(name = "video-studio", version, about)]
struct Args {
    /// Base URL of the studio service
    #[arg(long, default_value = DEFAULT_SERVICE_URL)]
    service_url: String,

    /// Album code to prefill at startup
    #[arg(long)]
    album_code: Option<String>,
}

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Templates,
    SelectImages,
    MyVideos,
}

/// Main application state
struct VideoStudio {
    client: StudioClient,
    store: Option<Store>,

    screen: Screen,
    /// Status message to display to the user
    status: String,

    // Templates screen
    templates: Vec<Template>,
    templates_loading: bool,
    album_code_input: String,
    recent_albums: Vec<String>,

    // Active album context
    active_template: Option<Template>,
    album_code: String,
    album: Option<Album>,
    album_loading: bool,
    /// Bumped on every album fetch; stale responses are dropped
    album_generation: u64,

    // Selection over the album
    selection: SelectionState,
    grid_page: PageWindow,
    thumbnails: HashMap<String, Handle>,
    thumbnails_pending: HashSet<String>,
    reorder: Option<ReorderDraft>,

    // Contact form and submission
    contact: ContactDetails,
    contact_form_open: bool,
    show_field_errors: bool,
    submitting: bool,
    submit_error: Option<String>,

    // My videos screen
    orders: Vec<Order>,
    orders_loading: bool,
    orders_page: PageWindow,
    viewed_order: Option<i64>,
    retrying_order: Option<i64>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    // Templates screen
    TemplatesFetched(Result<Vec<Template>, String>),
    RefreshTemplates,
    AlbumCodeChanged(String),
    RecentAlbumPicked(String),
    TemplatePicked(String),

    // Album and grid
    AlbumFetched {
        generation: u64,
        result: Result<Album, String>,
    },
    AlbumReloadRequested,
    ThumbnailLoaded {
        id: String,
        handle: Option<Handle>,
    },
    GridPageChanged(usize),

    // Selection
    ImageToggled(String),
    EvictionResolved(String),
    ImageReplaced { old_id: String },
    OverflowCancelled,
    SelectionCleared,

    // Rearrange panel
    ReorderOpened,
    ReorderMoved { id: String, to: usize },
    ReorderRemoved(String),
    ReorderConfirmed,
    ReorderCancelled,

    // Contact form and submission
    ContactFormOpened,
    ContactFormClosed,
    NameChanged(String),
    WhatsappChanged(String),
    EmailChanged(String),
    SubmitPressed,
    OrderSubmitted(Result<String, String>),

    // Navigation and order history
    TemplatesRequested,
    OrdersRequested,
    OrdersFetched(Result<Vec<Order>, String>),
    OrdersPageChanged(usize),
    OrderViewed(i64),
    OrderDetailsClosed,
    RetryPressed(i64),
    OrderRetried {
        order_id: i64,
        result: Result<String, String>,
    },
}

impl VideoStudio {
    /// Create a new instance of the application and kick off the
    /// template fetch
    fn new(args: Args) -> (Self, Task<Message>) {
        let client = StudioClient::new(args.service_url);

        let store = match Store::new() {
            Ok(store) => Some(store),
            Err(err) => {
                warn!(%err, "local store unavailable, continuing without it");
                None
            }
        };

        let contact = store
            .as_ref()
            .and_then(|s| s.last_contact().ok().flatten())
            .unwrap_or_default();
        let recent_albums = store
            .as_ref()
            .and_then(|s| s.recent_albums(RECENT_ALBUM_LIMIT).ok())
            .unwrap_or_default();
        let album_code_input = args
            .album_code
            .or_else(|| recent_albums.first().cloned())
            .unwrap_or_default();

        let app = VideoStudio {
            client: client.clone(),
            store,
            screen: Screen::Templates,
            status: "Loading templates...".to_string(),
            templates: Vec::new(),
            templates_loading: true,
            album_code_input,
            recent_albums,
            active_template: None,
            album_code: String::new(),
            album: None,
            album_loading: false,
            album_generation: 0,
            selection: SelectionState::new(DEFAULT_REQUIRED_IMAGES as usize),
            grid_page: PageWindow::new(IMAGES_PER_PAGE),
            thumbnails: HashMap::new(),
            thumbnails_pending: HashSet::new(),
            reorder: None,
            contact,
            contact_form_open: false,
            show_field_errors: false,
            submitting: false,
            submit_error: None,
            orders: Vec::new(),
            orders_loading: false,
            orders_page: PageWindow::new(ORDERS_PER_PAGE),
            viewed_order: None,
            retrying_order: None,
        };

        let task = Task::perform(
            async move { client.fetch_templates().await.map_err(|e| e.to_string()) },
            Message::TemplatesFetched,
        );

        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TemplatesFetched(Ok(templates)) => {
                self.templates_loading = false;
                self.status = format!("{} templates available.", templates.len());
                self.templates = templates;
                Task::none()
            }
            Message::TemplatesFetched(Err(err)) => {
                self.templates_loading = false;
                error!(%err, "template fetch failed");
                self.status = format!("Could not load templates: {err}");
                Task::none()
            }
            Message::RefreshTemplates => {
                self.templates_loading = true;
                self.status = "Loading templates...".to_string();
                let client = self.client.clone();
                Task::perform(
                    async move { client.fetch_templates().await.map_err(|e| e.to_string()) },
                    Message::TemplatesFetched,
                )
            }
            Message::AlbumCodeChanged(code) => {
                self.album_code_input = code;
                Task::none()
            }
            Message::RecentAlbumPicked(code) => {
                self.album_code_input = code;
                Task::none()
            }
            Message::TemplatePicked(template_id) => self.start_album(template_id),
            Message::AlbumFetched { generation, result } => {
                if generation != self.album_generation {
                    // A newer fetch has started since; this response lost
                    info!(generation, "dropping stale album response");
                    return Task::none();
                }
                self.album_loading = false;
                match result {
                    Ok(album) => {
                        self.status = format!("{} images in album.", album.items.len());
                        self.grid_page.clamp_to(album.items.len());
                        self.selection.prune(|id| album.contains(id));
                        self.album = Some(album);
                        self.load_visible_thumbnails()
                    }
                    Err(err) => {
                        error!(%err, "album fetch failed");
                        self.status = format!("Could not load the album: {err}");
                        Task::none()
                    }
                }
            }
            Message::AlbumReloadRequested => {
                if self.album_code.is_empty() {
                    return Task::none();
                }
                self.album_loading = true;
                self.album_generation += 1;
                self.status = format!("Reloading album {}...", self.album_code);
                let generation = self.album_generation;
                let code = self.album_code.clone();
                let client = self.client.clone();
                Task::perform(
                    async move { client.fetch_album(&code).await.map_err(|e| e.to_string()) },
                    move |result| Message::AlbumFetched { generation, result },
                )
            }
            Message::ThumbnailLoaded { id, handle } => {
                self.thumbnails_pending.remove(&id);
                if let Some(handle) = handle {
                    self.thumbnails.insert(id, handle);
                }
                Task::none()
            }
            Message::GridPageChanged(page) => {
                self.grid_page.go_to(page);
                self.load_visible_thumbnails()
            }
            Message::ImageToggled(id) => {
                self.selection.toggle(&id);
                Task::none()
            }
            Message::EvictionResolved(id) => {
                self.selection.resolve_by_eviction(&id);
                Task::none()
            }
            Message::ImageReplaced { old_id } => {
                // Swap the parked candidate into the evicted slot, keeping
                // the submission order otherwise intact
                if let Some(candidate) = self.selection.pending().map(str::to_string) {
                    self.selection.replace(&old_id, &candidate);
                }
                Task::none()
            }
            Message::OverflowCancelled => {
                self.selection.cancel_pending();
                Task::none()
            }
            Message::SelectionCleared => {
                self.selection.clear_all();
                self.reorder = None;
                Task::none()
            }
            Message::ReorderOpened => {
                self.reorder = Some(ReorderDraft::new(self.selection.selected()));
                Task::none()
            }
            Message::ReorderMoved { id, to } => {
                if let Some(draft) = &mut self.reorder {
                    draft.move_to(&id, to);
                }
                Task::none()
            }
            Message::ReorderRemoved(id) => {
                // Removing during rearrange hits the draft and the live
                // selection together, so the two cannot diverge
                if let Some(draft) = &mut self.reorder {
                    draft.remove(&id);
                }
                self.selection.resolve_by_eviction(&id);
                Task::none()
            }
            Message::ReorderConfirmed => {
                if let Some(draft) = self.reorder.take() {
                    self.selection.apply_order(&draft.confirm());
                }
                Task::none()
            }
            Message::ReorderCancelled => {
                self.reorder = None;
                Task::none()
            }
            Message::ContactFormOpened => {
                self.contact_form_open = true;
                self.submit_error = None;
                Task::none()
            }
            Message::ContactFormClosed => {
                // Entered details stay for the next attempt
                self.contact_form_open = false;
                Task::none()
            }
            Message::NameChanged(name) => {
                self.contact.name = name;
                Task::none()
            }
            Message::WhatsappChanged(whatsapp) => {
                self.contact.whatsapp = whatsapp;
                Task::none()
            }
            Message::EmailChanged(email) => {
                self.contact.email = email;
                Task::none()
            }
            Message::SubmitPressed => self.submit_order(),
            Message::OrderSubmitted(Ok(message)) => {
                info!("order submitted");
                self.submitting = false;
                self.contact_form_open = false;
                self.show_field_errors = false;
                self.status = message;
                self.open_my_videos()
            }
            Message::OrderSubmitted(Err(err)) => {
                // Selection and contact details are untouched, so a retry
                // does not force re-entry
                error!(%err, "order submission failed");
                self.submitting = false;
                self.submit_error = Some(err);
                Task::none()
            }
            Message::TemplatesRequested => {
                self.screen = Screen::Templates;
                Task::none()
            }
            Message::OrdersRequested => self.open_my_videos(),
            Message::OrdersFetched(Ok(orders)) => {
                self.orders_loading = false;
                self.orders_page.clamp_to(orders.len());
                self.status = format!("{} videos found.", orders.len());
                self.orders = orders;
                Task::none()
            }
            Message::OrdersFetched(Err(err)) => {
                self.orders_loading = false;
                error!(%err, "order fetch failed");
                self.status = format!("Could not load your videos: {err}");
                Task::none()
            }
            Message::OrdersPageChanged(page) => {
                self.orders_page.go_to(page);
                Task::none()
            }
            Message::OrderViewed(order_id) => {
                self.viewed_order = Some(order_id);
                Task::none()
            }
            Message::OrderDetailsClosed => {
                self.viewed_order = None;
                Task::none()
            }
            Message::RetryPressed(order_id) => self.retry_order(order_id),
            Message::OrderRetried { order_id, result } => {
                self.retrying_order = None;
                match result {
                    Ok(message) => {
                        info!(order_id, "order resubmitted");
                        self.status = message;
                        if let Some(order) =
                            self.orders.iter_mut().find(|o| o.order_id == order_id)
                        {
                            order.status = OrderStatus::Pending;
                        }
                    }
                    Err(err) => {
                        error!(order_id, %err, "order resubmit failed");
                        self.status = format!("Resubmit failed: {err}");
                    }
                }
                Task::none()
            }
        }
    }

    /// Enter the image-selection screen for a template and album code
    fn start_album(&mut self, template_id: String) -> Task<Message> {
        let Some(template) = self
            .templates
            .iter()
            .find(|t| t.template_id == template_id)
            .cloned()
        else {
            return Task::none();
        };

        let code = self.album_code_input.trim().to_string();
        if code.is_empty() {
            self.status = "Enter your album code first.".to_string();
            return Task::none();
        }

        // Fresh selection context: the old album's state must not survive
        self.selection = SelectionState::new(template.max_selected());
        self.active_template = Some(template);
        self.album_code = code.clone();
        self.album = None;
        self.album_loading = true;
        self.grid_page.reset();
        self.thumbnails.clear();
        self.thumbnails_pending.clear();
        self.reorder = None;
        self.contact_form_open = false;
        self.show_field_errors = false;
        self.submit_error = None;
        self.screen = Screen::SelectImages;
        self.album_generation += 1;

        if let Some(store) = &self.store {
            if let Err(err) = store.remember_album(&code) {
                warn!(%err, "could not remember album code");
            }
            self.recent_albums = store.recent_albums(RECENT_ALBUM_LIMIT).unwrap_or_default();
        }

        self.status = format!("Loading album {code}...");
        let generation = self.album_generation;
        let client = self.client.clone();
        Task::perform(
            async move { client.fetch_album(&code).await.map_err(|e| e.to_string()) },
            move |result| Message::AlbumFetched { generation, result },
        )
    }

    /// Fetch thumbnails for the grid page currently on screen
    fn load_visible_thumbnails(&mut self) -> Task<Message> {
        let Some(album) = &self.album else {
            return Task::none();
        };

        let mut tasks = Vec::new();
        for item in page(&album.items, self.grid_page) {
            if self.thumbnails.contains_key(&item.id)
                || self.thumbnails_pending.contains(&item.id)
            {
                continue;
            }
            self.thumbnails_pending.insert(item.id.clone());

            let http = self.client.http().clone();
            let album_code = self.album_code.clone();
            let item = item.clone();
            let id = item.id.clone();
            tasks.push(Task::perform(
                api::images::load_thumbnail(http, album_code, item),
                move |handle| Message::ThumbnailLoaded {
                    id: id.clone(),
                    handle,
                },
            ));
        }

        Task::batch(tasks)
    }

    /// Validate, assemble and send the order
    fn submit_order(&mut self) -> Task<Message> {
        if state::form::validate(&self.contact).is_err() {
            self.show_field_errors = true;
            return Task::none();
        }

        let (Some(template), Some(album)) = (&self.active_template, &self.album) else {
            self.status = "The album is not loaded yet.".to_string();
            return Task::none();
        };

        match OrderPayload::build(
            &template.template_id,
            &self.album_code,
            album,
            &self.contact,
            self.selection.selected(),
            self.selection.max_selected(),
        ) {
            Ok(payload) => {
                self.submitting = true;
                self.submit_error = None;
                if let Some(store) = &self.store {
                    if let Err(err) = store.save_contact(&self.contact) {
                        warn!(%err, "could not remember contact details");
                    }
                }
                let client = self.client.clone();
                Task::perform(
                    async move { client.submit_order(&payload).await.map_err(|e| e.to_string()) },
                    Message::OrderSubmitted,
                )
            }
            Err(err) => {
                // A stale id aborts here with nothing sent
                error!(%err, "payload assembly failed");
                self.submit_error = Some(err.to_string());
                Task::none()
            }
        }
    }

    /// Switch to the order-history screen and refresh it
    fn open_my_videos(&mut self) -> Task<Message> {
        self.screen = Screen::MyVideos;
        self.viewed_order = None;

        let code = if self.album_code.is_empty() {
            self.album_code_input.trim().to_string()
        } else {
            self.album_code.clone()
        };
        if code.is_empty() {
            self.orders.clear();
            self.status = "Enter your album code to see your videos.".to_string();
            return Task::none();
        }

        self.orders_loading = true;
        self.orders_page.reset();
        self.status = "Loading your videos...".to_string();
        let client = self.client.clone();
        Task::perform(
            async move { client.fetch_orders(&code).await.map_err(|e| e.to_string()) },
            Message::OrdersFetched,
        )
    }

    /// Resubmit a stored order with its original fields
    fn retry_order(&mut self, order_id: i64) -> Task<Message> {
        let Some(order) = self.orders.iter().find(|o| o.order_id == order_id) else {
            return Task::none();
        };

        match OrderPayload::from_order(order) {
            Ok(payload) => {
                self.retrying_order = Some(order_id);
                let client = self.client.clone();
                Task::perform(
                    async move { client.submit_order(&payload).await.map_err(|e| e.to_string()) },
                    move |result| Message::OrderRetried { order_id, result },
                )
            }
            Err(err) => {
                self.status = err.to_string();
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let nav = row![
            text("Video Studio").size(24),
            horizontal_space(),
            button(text("Templates").size(14))
                .on_press(Message::TemplatesRequested)
                .style(button::text),
            button(text("My Videos").size(14))
                .on_press(Message::OrdersRequested)
                .style(button::text),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let content = match self.screen {
            Screen::Templates => self.templates_view(),
            Screen::SelectImages => self.select_images_view(),
            Screen::MyVideos => self.my_videos_view(),
        };

        column![
            nav,
            horizontal_rule(1),
            scrollable(content).height(Length::Fill),
            horizontal_rule(1),
            text(&self.status).size(13),
        ]
        .spacing(12)
        .padding(16)
        .into()
    }

    fn templates_view(&self) -> Element<Message> {
        let mut recent: Vec<Element<Message>> = vec![text("Album code").size(14).into()];
        recent.push(
            iced::widget::text_input("e.g. 282853GMQB", &self.album_code_input)
                .on_input(Message::AlbumCodeChanged)
                .padding(10)
                .width(Length::Fixed(280.0))
                .into(),
        );
        if !self.recent_albums.is_empty() {
            let chips: Vec<Element<Message>> = self
                .recent_albums
                .iter()
                .map(|code| {
                    button(text(code.as_str()).size(12))
                        .on_press(Message::RecentAlbumPicked(code.clone()))
                        .style(button::secondary)
                        .into()
                })
                .collect();
            recent.push(
                iced::widget::Row::with_children(chips)
                    .spacing(6)
                    .into(),
            );
        }

        let can_use = !self.album_code_input.trim().is_empty();
        let body: Element<Message> = if self.templates_loading {
            text("Loading templates...").size(14).into()
        } else if self.templates.is_empty() {
            column![
                text("No templates available.").size(14),
                button(text("Retry").size(13))
                    .on_press(Message::RefreshTemplates)
                    .style(button::secondary),
            ]
            .spacing(8)
            .into()
        } else {
            ui::templates::template_gallery(&self.templates, can_use)
        };

        column![
            text("Pick a template").size(28),
            Column::with_children(recent).spacing(6),
            body,
        ]
        .spacing(16)
        .into()
    }

    fn select_images_view(&self) -> Element<Message> {
        let Some(template) = &self.active_template else {
            return column![
                text("Pick a template first.").size(15),
                button(text("Browse templates").size(13))
                    .on_press(Message::TemplatesRequested)
                    .style(button::primary),
            ]
            .spacing(10)
            .into();
        };

        let mut sections: Vec<Element<Message>> = vec![
            text("Select Your Media").size(28).into(),
            text(format!("Template: {}", template.name)).size(15).into(),
            text(format!(
                "Choose up to {} images to create your video",
                self.selection.max_selected()
            ))
            .size(13)
            .into(),
            text(format!(
                "Selected Images: {}/{}",
                self.selection.len(),
                self.selection.max_selected()
            ))
            .size(14)
            .into(),
        ];

        if self.album_loading {
            sections.push(text("Loading album...").size(14).into());
        } else if let Some(album) = &self.album {
            if album.items.is_empty() {
                sections.push(text("This album has no images yet.").size(14).into());
            } else {
                sections.push(ui::pager::pager(
                    self.grid_page,
                    album.items.len(),
                    Message::GridPageChanged,
                ));
                sections.push(ui::grid::image_grid(
                    page(&album.items, self.grid_page),
                    &self.thumbnails,
                    &self.selection,
                ));
            }

            if self.selection.mode() == SelectionMode::OverflowPending {
                sections.push(ui::carousel::overflow_prompt(
                    album,
                    &self.selection,
                    &self.thumbnails,
                ));
            }

            if let Some(draft) = &self.reorder {
                sections.push(ui::carousel::reorder_panel(draft, album, &self.thumbnails));
            } else if !self.selection.is_empty() {
                sections.push(ui::carousel::selected_strip(
                    album,
                    &self.selection,
                    &self.thumbnails,
                ));
            }

            let ready = self.selection.len() >= MIN_SELECTED_IMAGES;
            let label = if ready {
                "Generate Video"
            } else {
                "Please select at least two images!"
            };
            sections.push(
                button(text(label).size(16))
                    .on_press_maybe(
                        (ready && !self.contact_form_open).then_some(Message::ContactFormOpened),
                    )
                    .style(button::primary)
                    .padding(14)
                    .into(),
            );

            if self.contact_form_open {
                sections.push(ui::form::contact_form(
                    &self.contact,
                    self.show_field_errors,
                    self.submitting,
                    self.submit_error.as_deref(),
                ));
            }
        } else {
            sections.push(text("The album could not be loaded.").size(14).into());
            sections.push(
                button(text("Try again").size(13))
                    .on_press(Message::AlbumReloadRequested)
                    .style(button::secondary)
                    .into(),
            );
        }

        Column::with_children(sections).spacing(14).into()
    }

    fn my_videos_view(&self) -> Element<Message> {
        let mut sections: Vec<Element<Message>> = vec![text("Your Videos").size(28).into()];

        if self.orders_loading {
            sections.push(text("Loading your videos...").size(14).into());
        } else if self.orders.is_empty() {
            sections.push(text("No videos yet for this album.").size(14).into());
            sections.push(
                button(text("Refresh").size(13))
                    .on_press(Message::OrdersRequested)
                    .style(button::secondary)
                    .into(),
            );
        } else {
            sections.push(ui::pager::pager(
                self.orders_page,
                self.orders.len(),
                Message::OrdersPageChanged,
            ));
            sections.push(ui::orders::order_gallery(page(
                &self.orders,
                self.orders_page,
            )));

            if let Some(order_id) = self.viewed_order {
                if let Some(order) = self.orders.iter().find(|o| o.order_id == order_id) {
                    sections.push(ui::orders::order_details(
                        order,
                        self.retrying_order == Some(order_id),
                    ));
                }
            }
        }

        Column::with_children(sections).spacing(14).into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    info!(service_url = %args.service_url, "starting video studio");

    iced::application("Video Studio", VideoStudio::update, VideoStudio::view)
        .theme(VideoStudio::theme)
        .centered()
        .run_with(move || VideoStudio::new(args))
}
