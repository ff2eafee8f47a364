use iced::widget::{button, column, container, image, pick_list, radio, row, text, Space};
use iced::{Alignment, Color, Element, Font, Length, Theme};

use crate::app::{scaled, Message};
use crate::demo::{DemoState, ExampleListing, ImageSource, RunState};
use crate::theme::{danger_color, success_color, tertiary_color, warning_color};

pub const SPINNER_MESSAGE: &str = "Analisando a imagem com os novos parâmetros...";

pub fn view<'a>(fs: f32, state: &'a DemoState, theme: &Theme) -> Element<'a, Message> {
    let bold = Font {
        weight: iced::font::Weight::Bold,
        ..Font::DEFAULT
    };

    let sources = row![
        radio(
            ImageSource::Upload.label(),
            ImageSource::Upload,
            Some(state.source),
            Message::SourceChanged,
        )
        .size(scaled(16.0, fs))
        .text_size(scaled(14.0, fs)),
        radio(
            ImageSource::Example.label(),
            ImageSource::Example,
            Some(state.source),
            Message::SourceChanged,
        )
        .size(scaled(16.0, fs))
        .text_size(scaled(14.0, fs)),
    ]
    .spacing(24);

    let picker = match state.source {
        ImageSource::Upload => upload_picker(fs, state, theme),
        ImageSource::Example => example_picker(fs, state, theme),
    };

    let mut col = column![
        text("Teste o Detector com sua Imagem").size(scaled(20.0, fs)).font(bold),
        Space::new().height(12),
        sources,
        Space::new().height(12),
        picker,
    ]
    .spacing(0);

    if let Some(notice) = &state.notice {
        col = col
            .push(Space::new().height(12))
            .push(message_box(fs, notice.to_string(), danger_color(theme)));
    }

    col.push(Space::new().height(16))
        .push(panes(fs, state, theme))
        .into()
}

fn upload_picker<'a>(fs: f32, state: &'a DemoState, theme: &Theme) -> Element<'a, Message> {
    let tertiary = tertiary_color(theme);
    let current: Element<'a, Message> = match &state.uploaded {
        Some(image) => text(image.name.as_str()).size(scaled(14.0, fs)).into(),
        None => text("Nenhum arquivo selecionado")
            .size(scaled(14.0, fs))
            .color(tertiary)
            .into(),
    };

    container(
        column![
            text("Arraste e solte uma imagem na janela ou clique para procurar")
                .size(scaled(13.0, fs))
                .color(tertiary),
            Space::new().height(8),
            row![
                button(text("\u{1F4C2} Procurar arquivo").size(scaled(13.0, fs)))
                    .on_press(Message::SelectUpload)
                    .padding([6, 14])
                    .style(button::secondary),
                current,
            ]
            .spacing(12)
            .align_y(Alignment::Center),
            Space::new().height(4),
            text("JPG, JPEG, PNG").size(scaled(12.0, fs)).color(tertiary),
        ]
        .spacing(0),
    )
    .padding([14, 16])
    .width(Length::Fill)
    .style(container::rounded_box)
    .into()
}

fn example_picker<'a>(fs: f32, state: &'a DemoState, theme: &Theme) -> Element<'a, Message> {
    match &state.listing {
        None => text("Procurando imagens de exemplo\u{2026}")
            .size(scaled(14.0, fs))
            .color(tertiary_color(theme))
            .into(),
        Some(ExampleListing::Unavailable(err)) => {
            message_box(fs, err.to_string(), danger_color(theme))
        }
        Some(ExampleListing::Empty(warning)) => {
            message_box(fs, warning.to_string(), warning_color(theme))
        }
        Some(ExampleListing::Ready(gallery)) => row![
            text("Escolha uma imagem de exemplo:").size(scaled(14.0, fs)),
            pick_list(
                gallery.names(),
                state.selected_example.clone(),
                Message::ExampleSelected,
            )
            .text_size(scaled(14.0, fs)),
            button(text("Atualizar").size(scaled(13.0, fs)))
                .on_press(Message::RescanExamples)
                .padding([6, 12])
                .style(button::text),
        ]
        .spacing(12)
        .align_y(Alignment::Center)
        .into(),
    }
}

fn panes<'a>(fs: f32, state: &'a DemoState, theme: &Theme) -> Element<'a, Message> {
    let bold = Font {
        weight: iced::font::Weight::Bold,
        ..Font::DEFAULT
    };

    let original: Element<'a, Message> = match state.current_image() {
        Some(source) => column![
            text("\u{1F5BC} Imagem Original").size(scaled(16.0, fs)).font(bold),
            Space::new().height(8),
            image(source.handle.clone()).width(Length::Fill),
        ]
        .into(),
        None => Space::new().into(),
    };

    let detections: Element<'a, Message> = match &state.run {
        RunState::Idle => Space::new().into(),
        RunState::Running {
            downloaded, total, ..
        } => {
            let status = if *downloaded > 0 {
                download_status(*downloaded, *total)
            } else {
                SPINNER_MESSAGE.to_string()
            };
            container(
                text(format!("\u{23F3} {status}"))
                    .size(scaled(14.0, fs))
                    .color(tertiary_color(theme)),
            )
            .padding([48, 16])
            .width(Length::Fill)
            .center_x(Length::Fill)
            .into()
        }
        RunState::Finished(view) => {
            let color = if view.report.is_success() {
                success_color(theme)
            } else {
                warning_color(theme)
            };
            column![
                text("\u{1F50D} Imagem com Detecções").size(scaled(16.0, fs)).font(bold),
                Space::new().height(8),
                image(view.handle.clone()).width(Length::Fill),
                Space::new().height(8),
                message_box(fs, view.report.message(), color),
            ]
            .into()
        }
        RunState::Failed(error) => message_box(fs, error.clone(), danger_color(theme)),
    };

    row![
        container(original).width(Length::FillPortion(1)),
        container(detections).width(Length::FillPortion(1)),
    ]
    .spacing(16)
    .into()
}

fn download_status(downloaded: u64, total: u64) -> String {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        format!("Baixando o classificador\u{2026} {pct}%")
    } else {
        format!("Baixando o classificador\u{2026} {downloaded} bytes")
    }
}

/// Tinted banner for reports and errors.
fn message_box<'a>(fs: f32, message: String, accent: Color) -> Element<'a, Message> {
    container(text(message).size(scaled(14.0, fs)).color(accent))
        .padding([10, 14])
        .width(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(Color { a: 0.12, ..accent })),
            border: iced::border::Border {
                radius: 8.0.into(),
                width: 1.0,
                color: Color { a: 0.4, ..accent },
            },
            ..container::Style::default()
        })
        .into()
}
