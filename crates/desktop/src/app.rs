use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, TryRecvError};
use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{Element, Font, Length, Subscription, Task, Theme};

use facescan_core::detection::domain::detection_params::{
    DetectionParams, MIN_NEIGHBORS_BOUNDS, MIN_SIZE_BOUNDS, SCALE_FACTOR_BOUNDS,
};
use facescan_core::imaging::infrastructure::example_gallery::is_supported_image;
use facescan_core::pipeline::interaction::InteractionError;
use facescan_core::shared::constants::IMAGE_EXTENSIONS;

use crate::demo::{self, DemoState, ImageSource, SourceImage};
use crate::settings::{Appearance, Settings};
use crate::tabs;
use crate::theme;
use crate::workers::detection_worker::{self, DetectionJob, WorkerMessage};
use crate::workers::model_cache::ModelCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Explanation,
    Demo,
    Preferences,
}

impl Tab {
    const ALL: &[Tab] = &[Tab::Explanation, Tab::Demo, Tab::Preferences];

    fn label(self) -> &'static str {
        match self {
            Tab::Explanation => "\u{1F9E0} Como o Algoritmo Funciona?",
            Tab::Demo => "\u{1F680} Demonstração Prática",
            Tab::Preferences => "Preferências",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(Tab),
    ScaleFactorChanged(f64),
    MinNeighborsChanged(u32),
    MinSizeChanged(u32),
    RestoreDefaults,
    ApplyAndTest,
    ApplyHover(bool),
    SourceChanged(ImageSource),
    SelectUpload,
    UploadPicked(Option<PathBuf>),
    FileDropped(PathBuf),
    ExampleSelected(String),
    RescanExamples,
    ImageLoaded(ImageSource, Result<SourceImage, InteractionError>),
    PollWorker,
    OpenPaper,
    SelectExamplesDir,
    ExamplesDirSelected(Option<PathBuf>),
    AppearanceChanged(Appearance),
    HighContrastChanged(bool),
    FontScaleChanged(f32),
    PollSystemTheme,
}

pub struct App {
    active_tab: Tab,
    settings: Settings,
    demo: DemoState,
    model_cache: Arc<ModelCache>,
    worker: Option<Receiver<WorkerMessage>>,
    apply_hovered: bool,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        (
            Self {
                active_tab: Tab::Explanation,
                settings: Settings::load(),
                demo: DemoState::default(),
                model_cache: ModelCache::new(),
                worker: None,
                apply_hovered: false,
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.active_tab = tab;
            }
            Message::ScaleFactorChanged(value) => {
                self.update_params(|p| p.scale_factor = SCALE_FACTOR_BOUNDS.snap(value));
            }
            Message::MinNeighborsChanged(value) => {
                self.update_params(|p| p.min_neighbors = MIN_NEIGHBORS_BOUNDS.clamp(value));
            }
            Message::MinSizeChanged(value) => {
                self.update_params(|p| p.min_size = MIN_SIZE_BOUNDS.clamp(value));
            }
            Message::RestoreDefaults => {
                self.update_params(|p| *p = DetectionParams::default());
            }
            Message::ApplyAndTest => {
                return self.start_detection();
            }
            Message::ApplyHover(hovered) => {
                self.apply_hovered = hovered;
            }
            Message::SourceChanged(source) => {
                self.demo.set_source(source);
                if source == ImageSource::Example && self.demo.listing.is_none() {
                    return self.rescan_examples();
                }
            }
            Message::SelectUpload => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Escolha uma imagem")
                            .add_filter("Imagens", IMAGE_EXTENSIONS)
                            .pick_file()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::UploadPicked,
                );
            }
            Message::UploadPicked(Some(path)) => {
                return load_image(ImageSource::Upload, path);
            }
            Message::UploadPicked(None) => {}
            Message::FileDropped(path) => {
                self.active_tab = Tab::Demo;
                self.demo.set_source(ImageSource::Upload);
                if is_supported_image(&path) {
                    return load_image(ImageSource::Upload, path);
                }
                log::warn!("Ignoring dropped file {}", path.display());
                self.demo.notice = Some(InteractionError::UnreadableImage(format!(
                    "{} (use JPG, JPEG ou PNG)",
                    path.display()
                )));
            }
            Message::ExampleSelected(name) => {
                if let Some(path) = self.demo.select_example(name) {
                    return load_image(ImageSource::Example, path);
                }
            }
            Message::RescanExamples => {
                return self.rescan_examples();
            }
            Message::ImageLoaded(source, result) => {
                self.demo.image_loaded(source, result);
            }
            Message::PollWorker => {
                self.poll_worker();
            }
            Message::OpenPaper => {
                if let Err(e) = open::that(tabs::explanation_tab::VIOLA_JONES_PAPER_URL) {
                    log::warn!("Could not open browser: {e}");
                }
            }
            Message::SelectExamplesDir => {
                let start_dir = self.settings.examples_dir.clone();
                return Task::perform(
                    async move {
                        rfd::AsyncFileDialog::new()
                            .set_title("Pasta de imagens de exemplo")
                            .set_directory(start_dir)
                            .pick_folder()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::ExamplesDirSelected,
                );
            }
            Message::ExamplesDirSelected(Some(dir)) => {
                self.settings.examples_dir = dir;
                self.settings.save();
                self.demo.listing = None;
                if self.demo.source == ImageSource::Example {
                    return self.rescan_examples();
                }
            }
            Message::ExamplesDirSelected(None) => {}
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
                // Theme is resolved fresh in theme() on every render.
            }
        }
        Task::none()
    }

    fn update_params(&mut self, change: impl FnOnce(&mut DetectionParams)) {
        let mut params = self.settings.params();
        change(&mut params);
        self.settings.set_params(params);
        self.settings.save();
    }

    fn rescan_examples(&mut self) -> Task<Message> {
        match self.demo.scan_examples(&self.settings.examples_dir) {
            Some(path) => load_image(ImageSource::Example, path),
            None => Task::none(),
        }
    }

    fn start_detection(&mut self) -> Task<Message> {
        self.active_tab = Tab::Demo;
        match self.demo.start_run() {
            Ok(Some(frame)) => {
                let params = self.settings.params();
                log::info!("Running detection with {params}");
                self.worker = Some(detection_worker::spawn(DetectionJob {
                    frame,
                    params,
                    model_cache: self.model_cache.clone(),
                }));
            }
            Ok(None) => {}
            Err(e) => log::info!("Detection not started: {e}"),
        }
        Task::none()
    }

    fn poll_worker(&mut self) {
        let Some(rx) = self.worker.clone() else {
            return;
        };
        loop {
            match rx.try_recv() {
                Ok(WorkerMessage::DownloadProgress(downloaded, total)) => {
                    self.demo.download_progress(downloaded, total);
                }
                Ok(WorkerMessage::Complete(outcome)) => {
                    self.demo.finish_run(&outcome.annotated, outcome.face_count());
                    self.worker = None;
                    return;
                }
                Ok(WorkerMessage::Error(e)) => {
                    self.demo.fail_run(e);
                    self.worker = None;
                    return;
                }
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    if self.demo.is_running() {
                        self.demo.fail_run("A detecção foi interrompida.".into());
                    }
                    self.worker = None;
                    return;
                }
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let fs = self.settings.font_scale;
        let theme = self.theme();

        let sidebar = tabs::control_panel::view(
            fs,
            self.settings.params(),
            self.demo.is_running(),
            self.apply_hovered,
            &theme,
        );

        let tab_bar = row(Tab::ALL
            .iter()
            .map(|&tab| {
                let label = text(tab.label()).size(scaled(14.0, fs));
                let btn = button(label)
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
            Tab::Explanation => tabs::explanation_tab::view(fs),
            Tab::Demo => tabs::demo_tab::view(fs, &self.demo, &theme),
            Tab::Preferences => tabs::preferences_tab::view(&self.settings, &theme),
        };

        let header = column![
            text("\u{1F464} Detector de Faces Interativo com Haar Cascade")
                .size(scaled(24.0, fs))
                .font(Font {
                    weight: iced::font::Weight::Bold,
                    ..Font::DEFAULT
                }),
            Space::new().height(4),
            text(
                "Uma aplicação para demonstrar e ensinar os fundamentos da detecção de \
                 objetos em Visão Computacional."
            )
            .size(scaled(14.0, fs))
            .color(theme::tertiary_color(&theme)),
        ];

        let main = column![
            header,
            Space::new().height(12),
            tab_bar,
            Space::new().height(12),
            scrollable(content).height(Length::Fill),
        ]
        .padding(16)
        .width(Length::Fill)
        .height(Length::Fill);

        row![container(sidebar).padding(8), main]
            .height(Length::Fill)
            .into()
    }

    pub fn theme(&self) -> Theme {
        theme::resolve_theme(self.settings.appearance, self.settings.high_contrast)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let mut subs = vec![iced::event::listen_with(|event, _status, _window| match event {
            iced::Event::Window(iced::window::Event::FileDropped(path)) => {
                Some(Message::FileDropped(path))
            }
            _ => None,
        })];
        if self.worker.is_some() {
            subs.push(iced::time::every(Duration::from_millis(50)).map(|_| Message::PollWorker));
        }
        if self.settings.appearance == Appearance::System {
            subs.push(iced::time::every(Duration::from_secs(2)).map(|_| Message::PollSystemTheme));
        }
        Subscription::batch(subs)
    }
}

fn load_image(source: ImageSource, path: PathBuf) -> Task<Message> {
    Task::perform(async move { demo::load_image(&path) }, move |result| {
        Message::ImageLoaded(source, result)
    })
}

/// Scale a base font size by the user's font_scale setting.
pub fn scaled(base: f32, font_scale: f32) -> f32 {
    (base * font_scale).round()
}
