//! App - the controller set behind the four views.
//!
//! `App` owns the current location and the state each view renders from.
//! Navigation resolves a path through the view-routing table, bumps a
//! generation counter and runs the view's entry request. A response is only
//! applied if no navigation happened while it was in flight; stale responses
//! are dropped.
//!
//! ## Example
//!
//! ```ignore
//! use vidzy::client::{App, VideoClient, VideoForm};
//!
//! let app = App::new(VideoClient::new("http://127.0.0.1:3000")?);
//! app.navigate("/add-video").await;
//! app.save(VideoForm::new("Title", "Description")).await;
//! assert_eq!(app.page().location, "/");
//! ```

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use super::error::ClientError;
use super::http::VideoClient;
use super::routes::{resolve, Resolution, Template, View, FALLBACK};
use crate::video::{Video, VideoInput};

/// Progress of a view's entry request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Editable fields of the add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoForm {
    pub title: String,
    pub description: String,
}

impl VideoForm {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

impl From<&Video> for VideoForm {
    fn from(video: &Video) -> Self {
        Self {
            title: video.title.clone().unwrap_or_default(),
            description: video.description.clone().unwrap_or_default(),
        }
    }
}

impl From<VideoForm> for VideoInput {
    fn from(form: VideoForm) -> Self {
        VideoInput::new(form.title, form.description)
    }
}

/// What the current view shows. `error` holds the last failed submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    List {
        videos: ViewState<Vec<Video>>,
    },
    Add {
        error: Option<String>,
    },
    Edit {
        id: String,
        form: ViewState<VideoForm>,
        error: Option<String>,
    },
    Delete {
        id: String,
        video: ViewState<Video>,
        error: Option<String>,
    },
}

/// Snapshot of the current page for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub location: String,
    pub template: Template,
    pub screen: Screen,
}

/// A navigation that has been entered but whose entry request has not run.
#[derive(Debug)]
#[must_use = "a transition does nothing until passed to App::load"]
pub struct Transition {
    generation: u64,
    view: View,
}

struct Current {
    generation: u64,
    page: Page,
}

pub struct App {
    client: VideoClient,
    current: Mutex<Current>,
}

impl App {
    /// A fresh app at `/`. Nothing is loaded until the first `navigate`.
    pub fn new(client: VideoClient) -> Self {
        Self {
            client,
            current: Mutex::new(Current {
                generation: 0,
                page: Page {
                    location: FALLBACK.to_string(),
                    template: Template::Home,
                    screen: Screen::List {
                        videos: ViewState::Loading,
                    },
                },
            }),
        }
    }

    pub fn client(&self) -> &VideoClient {
        &self.client
    }

    /// A copy of the current page.
    pub fn page(&self) -> Page {
        self.lock().page.clone()
    }

    /// Navigate to `path` and wait for its entry request.
    pub async fn navigate(&self, path: &str) {
        let transition = self.enter(path);
        self.load(transition).await;
    }

    /// Switch to the view for `path` without issuing its entry request.
    ///
    /// Unknown paths redirect to `/`. Any request still in flight for the
    /// previous view becomes stale.
    pub fn enter(&self, path: &str) -> Transition {
        let (location, view, template) = match resolve(path) {
            Resolution::View { view, template } => (path.to_string(), view, template),
            Resolution::Redirect(to) => {
                debug!(from = path, to, "redirecting unknown path");
                (to.to_string(), View::List, Template::Home)
            }
        };

        let screen = match &view {
            View::List => Screen::List {
                videos: ViewState::Loading,
            },
            View::Add => Screen::Add { error: None },
            View::Edit { id } => Screen::Edit {
                id: id.clone(),
                form: ViewState::Loading,
                error: None,
            },
            View::Delete { id } => Screen::Delete {
                id: id.clone(),
                video: ViewState::Loading,
                error: None,
            },
        };

        let mut current = self.lock();
        current.generation += 1;
        current.page = Page {
            location,
            template,
            screen,
        };

        Transition {
            generation: current.generation,
            view,
        }
    }

    /// Run the entry request for a transition and apply its result, unless
    /// another navigation has happened since.
    pub async fn load(&self, transition: Transition) {
        let Transition { generation, view } = transition;
        match view {
            View::List => {
                let result = self.client.list().await;
                self.apply(generation, |screen| {
                    if let Screen::List { videos } = screen {
                        *videos = view_state(result);
                    }
                });
            }
            View::Add => {}
            View::Edit { id } => {
                let result = self.client.get(&id).await;
                self.apply(generation, |screen| {
                    if let Screen::Edit { form, .. } = screen {
                        *form = view_state(result.map(|video| VideoForm::from(&video)));
                    }
                });
            }
            View::Delete { id } => {
                let result = self.client.get(&id).await;
                self.apply(generation, |screen| {
                    if let Screen::Delete { video, .. } = screen {
                        *video = view_state(result);
                    }
                });
            }
        }
    }

    /// Submit the add or edit form. On success navigates to `/`; on failure
    /// the form's `error` is set and the view stays put.
    pub async fn save(&self, form: VideoForm) {
        let (generation, target) = {
            let current = self.lock();
            let target = match &current.page.screen {
                Screen::Add { .. } => None,
                Screen::Edit { id, .. } => Some(id.clone()),
                _ => {
                    warn!(location = %current.page.location, "save is not available on this view");
                    return;
                }
            };
            (current.generation, target)
        };

        let input = VideoInput::from(form);
        let result = match &target {
            None => self.client.create(&input).await.map(|_| ()),
            Some(id) => self.client.update(id, &input).await.map(|_| ()),
        };
        self.finish_submit(generation, result).await;
    }

    /// Confirm deletion on the delete view. On success navigates to `/`.
    pub async fn confirm_delete(&self) {
        let (generation, id) = {
            let current = self.lock();
            match &current.page.screen {
                Screen::Delete { id, .. } => (current.generation, id.clone()),
                _ => {
                    warn!(location = %current.page.location, "delete is not available on this view");
                    return;
                }
            }
        };

        let result = self.client.delete(&id).await.map(|_| ());
        self.finish_submit(generation, result).await;
    }

    async fn finish_submit(&self, generation: u64, result: Result<(), ClientError>) {
        match result {
            Ok(()) => {
                if self.is_current(generation) {
                    self.navigate(FALLBACK).await;
                } else {
                    debug!(generation, "submit finished after navigation, not redirecting");
                }
            }
            Err(e) => {
                let message = e.to_string();
                self.apply(generation, |screen| match screen {
                    Screen::Add { error }
                    | Screen::Edit { error, .. }
                    | Screen::Delete { error, .. } => *error = Some(message),
                    Screen::List { .. } => {}
                });
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.lock().generation == generation
    }

    fn apply(&self, generation: u64, update: impl FnOnce(&mut Screen)) {
        let mut current = self.lock();
        if current.generation != generation {
            warn!(
                stale = generation,
                current = current.generation,
                "discarding response for a view that is no longer shown"
            );
            return;
        }
        update(&mut current.page.screen);
    }

    fn lock(&self) -> MutexGuard<'_, Current> {
        // A poisoned page is still a whole page.
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn view_state<T>(result: Result<T, ClientError>) -> ViewState<T> {
    match result {
        Ok(value) => ViewState::Ready(value),
        Err(e) => ViewState::Failed(e.to_string()),
    }
}
