use std::path::PathBuf;
use std::time::Duration;

use iced::widget::{button, column, container, image, row, scrollable, text};
use iced::{Element, Length, Subscription, Task, Theme};

use facescreen_core::classification::infrastructure::http_classifier::HttpClassifier;
use facescreen_core::detection::domain::face_mesh_extractor::FaceMeshExtractor;
use facescreen_core::detection::infrastructure::http_face_mesh_extractor::HttpFaceMeshExtractor;
use facescreen_core::shared::constants::{IMAGE_EXTENSIONS, SIMULATED_PROCESSING_DELAY};
use facescreen_core::shared::selected_image::SelectedImage;
use facescreen_core::workflow::infrastructure::background_worker::{
    spawn_extraction, spawn_processing, ExtractionResult, ProcessingEvent, WorkerHandle,
};
use facescreen_core::workflow::navigation::{ProcessingInput, Screen, Wizard};
use facescreen_core::workflow::processing_stage::ProcessingState;
use facescreen_core::workflow::processing_use_case::{ProcessingBackend, ProcessingUseCase};
use facescreen_core::workflow::upload_stage::{SubmitOutcome, SubmitRequest, UploadStage};
use facescreen_core::workflow::workflow_logger::SummaryWorkflowLogger;

use crate::screens;
use crate::settings::{Appearance, Settings, UploadBehavior};
use crate::theme;

/// How often outstanding workers are polled.
const WORKER_POLL_INTERVAL: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// Tab enum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Screening,
    Settings,
    Privacy,
}

impl Tab {
    const ALL: &[Tab] = &[Tab::Screening, Tab::Settings, Tab::Privacy];

    fn label(self) -> &'static str {
        match self {
            Tab::Screening => "Screening",
            Tab::Settings => "Settings",
            Tab::Privacy => "Privacy",
        }
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(Tab),
    PrimaryHovered(bool),
    Start,
    NextSlide,
    PreviousSlide,
    SelectPhoto,
    PhotoPicked(Option<PathBuf>),
    Submit,
    CancelProcessing,
    Restart,
    PollWorkers,
    ServiceUrlChanged(String),
    TimeoutChanged(u32),
    UploadBehaviorChanged(UploadBehavior),
    SimulateChanged(bool),
    RestoreDefaults,
    AppearanceChanged(Appearance),
    HighContrastChanged(bool),
    FontScaleChanged(f32),
    PollSystemTheme,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    active_tab: Tab,
    pub settings: Settings,
    wizard: Wizard,
    upload: UploadStage,
    preview: Option<image::Handle>,
    /// Problem reading the picked file, shown on the upload screen.
    pick_error: Option<String>,
    extraction: Option<WorkerHandle<ExtractionResult>>,
    processing: Option<WorkerHandle<ProcessingEvent>>,
    processing_state: ProcessingState,
    primary_hovered: bool,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();
        let upload = UploadStage::new(settings.submit_mode());
        (
            Self {
                active_tab: Tab::Screening,
                settings,
                wizard: Wizard::new(),
                upload,
                preview: None,
                pick_error: None,
                extraction: None,
                processing: None,
                processing_state: ProcessingState::Idle,
                primary_hovered: false,
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.active_tab = tab;
                self.primary_hovered = false;
            }
            Message::PrimaryHovered(hovered) => {
                self.primary_hovered = hovered;
            }
            Message::Start => {
                self.wizard.start();
                self.primary_hovered = false;
            }
            Message::NextSlide => {
                self.wizard.next_slide();
                self.primary_hovered = false;
                if *self.wizard.screen() == Screen::Upload {
                    self.reset_upload();
                }
            }
            Message::PreviousSlide => {
                self.wizard.previous_slide();
            }
            Message::SelectPhoto => {
                if self.upload.is_submitting() {
                    return Task::none();
                }
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Select a face photo")
                            .add_filter("Images", IMAGE_EXTENSIONS)
                            .pick_file()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::PhotoPicked,
                );
            }
            Message::PhotoPicked(Some(path)) => self.photo_picked(path),
            Message::PhotoPicked(None) => {}
            Message::Submit => self.submit(),
            Message::CancelProcessing => {
                // Dropping the handle cancels the worker.
                self.processing = None;
                self.restart();
            }
            Message::Restart => self.restart(),
            Message::PollWorkers => {
                self.poll_extraction();
                self.poll_processing();
            }
            Message::ServiceUrlChanged(url) => {
                self.settings.service_url = url;
                self.settings.save();
            }
            Message::TimeoutChanged(secs) => {
                self.settings.timeout_secs = secs;
                self.settings.save();
            }
            Message::UploadBehaviorChanged(behavior) => {
                self.settings.upload_behavior = behavior;
                self.settings.save();
            }
            Message::SimulateChanged(enabled) => {
                self.settings.simulate = enabled;
                self.settings.save();
            }
            Message::RestoreDefaults => {
                self.settings.restore_service_defaults();
                self.settings.save();
            }
            Message::AppearanceChanged(appearance) => {
                self.settings.appearance = appearance;
                self.settings.save();
            }
            Message::HighContrastChanged(enabled) => {
                self.settings.high_contrast = enabled;
                self.settings.save();
            }
            Message::FontScaleChanged(scale) => {
                self.settings.font_scale = scale;
                self.settings.save();
            }
            Message::PollSystemTheme => {
                // theme() re-resolves on every render; the tick only forces a redraw.
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let fs = self.settings.font_scale;
        let theme = self.theme();

        let tab_bar = row(Tab::ALL
            .iter()
            .map(|&tab| {
                let btn = button(text(tab.label()).size(scaled(13.0, fs)))
                    .on_press(Message::TabSelected(tab))
                    .padding([6, 14]);
                if tab == self.active_tab {
                    btn.style(button::primary).into()
                } else {
                    btn.style(button::text).into()
                }
            })
            .collect::<Vec<_>>())
        .spacing(2);

        let content: Element<'_, Message> = match self.active_tab {
            Tab::Screening => self.wizard_view(fs, &theme),
            Tab::Settings => screens::settings::view(&self.settings),
            Tab::Privacy => screens::privacy::view(fs, &self.settings.service_url),
        };

        let body = container(scrollable(content).height(Length::Fill))
            .padding(20)
            .height(Length::Fill);

        column![tab_bar, body].height(Length::Fill).into()
    }

    pub fn theme(&self) -> Theme {
        theme::resolve_theme(self.settings.appearance, self.settings.high_contrast)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let mut subs = Vec::new();
        if self.extraction.is_some() || self.processing.is_some() {
            subs.push(iced::time::every(WORKER_POLL_INTERVAL).map(|_| Message::PollWorkers));
        }
        if self.settings.appearance == Appearance::System {
            subs.push(iced::time::every(Duration::from_secs(2)).map(|_| Message::PollSystemTheme));
        }
        Subscription::batch(subs)
    }

    fn wizard_view(&self, fs: f32, theme: &Theme) -> Element<'_, Message> {
        let hovered = self.primary_hovered;
        match self.wizard.screen() {
            Screen::Opening => screens::opening::view(fs, hovered, theme),
            Screen::Instructions { slide } => screens::instructions::view(fs, *slide, hovered, theme),
            Screen::Upload => screens::upload::view(
                fs,
                &self.upload,
                self.preview.as_ref(),
                self.pick_error.as_deref(),
                hovered,
                theme,
            ),
            Screen::Processing => {
                screens::processing::view(fs, &self.processing_state, self.settings.simulate, theme)
            }
            Screen::Result(outcome) => screens::result::view(fs, outcome, hovered, theme),
        }
    }

    fn restart(&mut self) {
        if self.wizard.restart() {
            self.primary_hovered = false;
            self.reset_upload();
        }
    }

    /// Fresh upload screen, picking up the current submit mode.
    fn reset_upload(&mut self) {
        self.extraction = None;
        self.upload = UploadStage::new(self.settings.submit_mode());
        self.preview = None;
        self.pick_error = None;
    }

    fn photo_picked(&mut self, path: PathBuf) {
        match SelectedImage::from_path(&path) {
            Ok(image) => {
                let handle = image::Handle::from_bytes(image.bytes().to_vec());
                if self.upload.select(image) {
                    self.preview = Some(handle);
                    self.pick_error = None;
                }
            }
            Err(e) => {
                log::warn!("Cannot use {}: {e}", path.display());
                self.pick_error = Some(e.to_string());
            }
        }
    }

    fn submit(&mut self) {
        match self.upload.begin_submit() {
            None => {}
            Some(SubmitRequest::Navigate(input)) => self.enter_processing(input),
            Some(SubmitRequest::Extract(image)) => {
                let settings = self.settings.clone();
                self.extraction = Some(spawn_extraction(
                    move || {
                        let config = settings.service_config()?;
                        let extractor: Box<dyn FaceMeshExtractor> =
                            Box::new(HttpFaceMeshExtractor::new(&config)?);
                        Ok(extractor)
                    },
                    image,
                ));
            }
        }
    }

    fn enter_processing(&mut self, input: ProcessingInput) {
        if !self.wizard.submit_upload(input) {
            return;
        }
        self.preview = None;
        self.primary_hovered = false;
        self.processing_state = ProcessingState::Idle;

        let settings = self.settings.clone();
        let input = self.wizard.take_processing_input();
        self.processing = Some(spawn_processing(
            move || {
                let backend = if settings.simulate {
                    ProcessingBackend::Simulated {
                        delay: SIMULATED_PROCESSING_DELAY,
                    }
                } else {
                    let config = settings.service_config()?;
                    ProcessingBackend::Network {
                        extractor: Box::new(HttpFaceMeshExtractor::new(&config)?),
                        classifier: Box::new(HttpClassifier::new(&config)?),
                    }
                };
                Ok(ProcessingUseCase::new(
                    backend,
                    Box::new(SummaryWorkflowLogger::new()),
                ))
            },
            input,
        ));
    }

    fn poll_extraction(&mut self) {
        let Some(result) = self.extraction.as_ref().and_then(WorkerHandle::try_recv) else {
            return;
        };
        self.extraction = None;
        match self.upload.finish_extraction(result) {
            SubmitOutcome::Navigate(input) => self.enter_processing(input),
            SubmitOutcome::Failed(_) | SubmitOutcome::Inert => {}
        }
    }

    fn poll_processing(&mut self) {
        while let Some(event) = self.processing.as_ref().and_then(WorkerHandle::try_recv) {
            match event {
                ProcessingEvent::State(state) => self.processing_state = state,
                ProcessingEvent::Finished(outcome) => {
                    self.processing = None;
                    self.wizard.finish_processing(outcome);
                    self.primary_hovered = false;
                    break;
                }
            }
        }
    }
}

/// Scale a base font size by the user's font_scale setting.
pub fn scaled(base: f32, font_scale: f32) -> f32 {
    (base * font_scale).round()
}
