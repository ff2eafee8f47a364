use iced::widget::{button, checkbox, column, container, pick_list, row, slider, text, Space};
use iced::{Alignment, Element, Length, Theme};

use crate::app::{scaled, Message};
use crate::settings::{Appearance, Settings};
use crate::theme::tertiary_color;

pub fn view<'a>(settings: &'a Settings, theme: &Theme) -> Element<'a, Message> {
    let fs = settings.font_scale;
    let tertiary = tertiary_color(theme);

    let examples_dir = container(
        row![
            column![
                text("PASTA DE EXEMPLOS").size(scaled(11.0, fs)).color(tertiary),
                text(settings.examples_dir.display().to_string()).size(scaled(14.0, fs)),
            ]
            .width(Length::Fill),
            button(text("Alterar").size(scaled(13.0, fs)))
                .on_press(Message::SelectExamplesDir)
                .padding([6, 14])
                .style(button::secondary),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    )
    .padding([14, 16])
    .style(container::rounded_box)
    .width(Length::Fill);

    column![
        text("Imagens de exemplo").size(scaled(16.0, fs)),
        Space::new().height(8),
        examples_dir,
        Space::new().height(20),
        text("Tema").size(scaled(16.0, fs)),
        Space::new().height(8),
        row![
            text("Modo").size(scaled(13.0, fs)),
            pick_list(Appearance::ALL, Some(settings.appearance), Message::AppearanceChanged)
                .text_size(scaled(13.0, fs)),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
        Space::new().height(12),
        checkbox(settings.high_contrast)
            .label("Alto contraste")
            .on_toggle(Message::HighContrastChanged)
            .text_size(scaled(13.0, fs)),
        Space::new().height(20),
        text("Tamanho da fonte").size(scaled(16.0, fs)),
        Space::new().height(8),
        row![
            slider(0.8..=1.5, settings.font_scale, Message::FontScaleChanged).step(0.05),
            text(format!("{:.0}%", settings.font_scale * 100.0)).size(scaled(13.0, fs)),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    ]
    .spacing(0)
    .into()
}
