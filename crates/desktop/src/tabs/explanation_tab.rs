use iced::widget::{button, column, text, Space};
use iced::{Element, Font};

use crate::app::{scaled, Message};

pub const VIOLA_JONES_PAPER_URL: &str =
    "https://www.cs.cmu.edu/~efros/courses/LBMV07/Papers/viola-cvpr-01.pdf";

const INTRO: &str = "O Haar Cascade é um algoritmo de detecção de objetos baseado em \
     aprendizado de máquina, proposto por Paul Viola e Michael Jones em 2001. Embora hoje \
     existam métodos mais modernos, como redes neurais convolucionais, ele ainda é um \
     exemplo fantástico dos princípios fundamentais da Visão Computacional.";

const CONCEPTS: [(&str, &str); 3] = [
    (
        "1. Haar-like Features",
        "O algoritmo não olha para os pixels individualmente. Ele usa features \
         (características) que são retângulos medindo a diferença de intensidade entre \
         regiões da imagem. Em um rosto, a região dos olhos costuma ser mais escura que a \
         testa e as bochechas.",
    ),
    (
        "2. Imagem Integral (Integral Image)",
        "Para calcular essas features em toda a imagem de forma extremamente rápida, o \
         algoritmo pré-computa a Imagem Integral. Com ela, a soma dos pixels de qualquer \
         retângulo sai de apenas quatro operações, independentemente do tamanho do retângulo.",
    ),
    (
        "3. Cascata de Classificadores (Cascade of Classifiers)",
        "Cada janela da imagem passa por uma série de estágios de classificadores. A grande \
         maioria das janelas é descartada nos primeiros estágios, que são simples e rápidos, \
         e o detector concentra o esforço apenas nas regiões mais promissoras.",
    ),
];

const PARAMETERS: &str = "No Painel de Controle, o Fator de Escala define quanto a janela \
     cresce entre uma varredura e a próxima, o Mínimo de Vizinhos quantas detecções \
     sobrepostas confirmam um rosto, e o Tamanho Mínimo a menor janela considerada.";

pub fn view(fs: f32) -> Element<'static, Message> {
    let bold = Font {
        weight: iced::font::Weight::Bold,
        ..Font::DEFAULT
    };

    let mut col = column![
        text("O que é o Haar Cascade?").size(scaled(20.0, fs)).font(bold),
        Space::new().height(10),
        text(INTRO).size(scaled(14.0, fs)),
        Space::new().height(12),
        text("Ele funciona através de três conceitos principais:").size(scaled(14.0, fs)),
    ]
    .spacing(0);

    for (title, body) in CONCEPTS {
        col = col
            .push(Space::new().height(12))
            .push(text(title).size(scaled(15.0, fs)).font(bold))
            .push(Space::new().height(4))
            .push(text(body).size(scaled(14.0, fs)));
    }

    col.push(Space::new().height(16))
        .push(text(PARAMETERS).size(scaled(14.0, fs)))
        .push(Space::new().height(20))
        .push(
            button(text("Ler o artigo original de Viola e Jones").size(scaled(13.0, fs)))
                .on_press(Message::OpenPaper)
                .padding([8, 16])
                .style(button::secondary),
        )
        .into()
}
