use iced::widget::{button, column, container, row, slider, text, Space};
use iced::{Alignment, Color, Element, Font, Length, Theme};

use facescan_core::detection::domain::detection_params::{
    DetectionParams, MIN_NEIGHBORS_BOUNDS, MIN_SIZE_BOUNDS, SCALE_FACTOR_BOUNDS,
};

use crate::app::{scaled, Message};
use crate::theme::tertiary_color;
use crate::widgets::primary_button::primary_button;

const SCALE_FACTOR_HELP: &str = "Valores menores (~1.05) detectam mais faces, mas são mais lentos. \
     Valores maiores (~1.4) são mais rápidos, mas podem falhar em detectar faces menores.";
const MIN_NEIGHBORS_HELP: &str = "Controla falsos positivos. Um valor mais alto (e.g., 5-6) resulta \
     em detecções de maior qualidade, mas menos numerosas.";
const MIN_SIZE_HELP: &str = "Define o menor rosto a ser detectado em pixels. \
     Ajuda a ignorar 'ruídos' na imagem.";

/// Sidebar with the three scan parameters and the run trigger.
pub fn view<'a>(
    fs: f32,
    params: DetectionParams,
    running: bool,
    apply_hovered: bool,
    theme: &Theme,
) -> Element<'a, Message> {
    let tertiary = tertiary_color(theme);

    let scale = param_control(
        fs,
        tertiary,
        "Fator de Escala (scaleFactor)",
        format!("{:.2}", params.scale_factor),
        slider(
            SCALE_FACTOR_BOUNDS.min..=SCALE_FACTOR_BOUNDS.max,
            params.scale_factor,
            Message::ScaleFactorChanged,
        )
        .step(SCALE_FACTOR_BOUNDS.step)
        .into(),
        Message::ScaleFactorChanged(SCALE_FACTOR_BOUNDS.step_down(params.scale_factor)),
        Message::ScaleFactorChanged(SCALE_FACTOR_BOUNDS.step_up(params.scale_factor)),
        SCALE_FACTOR_HELP,
    );

    let neighbors = param_control(
        fs,
        tertiary,
        "Mínimo de Vizinhos (minNeighbors)",
        params.min_neighbors.to_string(),
        slider(
            MIN_NEIGHBORS_BOUNDS.min..=MIN_NEIGHBORS_BOUNDS.max,
            params.min_neighbors,
            Message::MinNeighborsChanged,
        )
        .step(MIN_NEIGHBORS_BOUNDS.step)
        .into(),
        Message::MinNeighborsChanged(MIN_NEIGHBORS_BOUNDS.step_down(params.min_neighbors)),
        Message::MinNeighborsChanged(MIN_NEIGHBORS_BOUNDS.step_up(params.min_neighbors)),
        MIN_NEIGHBORS_HELP,
    );

    let size = param_control(
        fs,
        tertiary,
        "Tamanho Mínimo da Face (minSize)",
        format!("{} px", params.min_size),
        slider(
            MIN_SIZE_BOUNDS.min..=MIN_SIZE_BOUNDS.max,
            params.min_size,
            Message::MinSizeChanged,
        )
        .step(MIN_SIZE_BOUNDS.step)
        .into(),
        Message::MinSizeChanged(MIN_SIZE_BOUNDS.step_down(params.min_size)),
        Message::MinSizeChanged(MIN_SIZE_BOUNDS.step_up(params.min_size)),
        MIN_SIZE_HELP,
    );

    let apply = primary_button(
        move || {
            text("\u{1F680} Aplicar e Testar")
                .size(scaled(15.0, fs))
                .color(Color::WHITE)
                .font(Font {
                    weight: iced::font::Weight::Bold,
                    ..Font::DEFAULT
                })
                .into()
        },
        (!running).then_some(Message::ApplyAndTest),
        apply_hovered,
        Message::ApplyHover,
        [12, 20],
        Length::Fill,
    );

    let restore = button(text("Restaurar padrões").size(scaled(13.0, fs)))
        .on_press_maybe((!running).then_some(Message::RestoreDefaults))
        .padding([6, 12])
        .style(button::text);

    let panel = column![
        text("\u{1F6E0} Painel de Controle").size(scaled(18.0, fs)).font(Font {
            weight: iced::font::Weight::Bold,
            ..Font::DEFAULT
        }),
        Space::new().height(16),
        scale,
        Space::new().height(16),
        neighbors,
        Space::new().height(16),
        size,
        Space::new().height(8),
        restore,
        Space::new().height(12),
        apply,
    ]
    .spacing(0);

    container(panel)
        .padding(16)
        .width(Length::Fixed(300.0))
        .height(Length::Fill)
        .style(container::rounded_box)
        .into()
}

#[allow(clippy::too_many_arguments)]
fn param_control<'a>(
    fs: f32,
    tertiary: Color,
    label: &'a str,
    value: String,
    input: Element<'a, Message>,
    on_decrement: Message,
    on_increment: Message,
    help: &'a str,
) -> Element<'a, Message> {
    let stepper = |symbol: &'a str, message: Message| {
        button(text(symbol).size(scaled(14.0, fs)))
            .on_press(message)
            .padding([2, 10])
            .style(button::secondary)
    };

    column![
        row![
            text(label).size(scaled(14.0, fs)).width(Length::Fill),
            text(value).size(scaled(14.0, fs)),
        ]
        .align_y(Alignment::Center),
        Space::new().height(6),
        row![
            stepper("\u{2212}", on_decrement),
            input,
            stepper("+", on_increment),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
        Space::new().height(4),
        text(help).size(scaled(12.0, fs)).color(tertiary),
    ]
    .into()
}
