//! Static page content: FAQ, legal documents and deal badges.

use crate::models::{DealType, FaqEntry, LegalResponse, LegalSectionResponse};

pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const FAQS: [Faq; 4] = [
    Faq {
        question: "O FlyAgente AI realmente encontra o menor preço?",
        answer: "Sim. Nosso agente utiliza inteligência artificial para comparar dados em tempo real de buscadores globais, companhias low-cost e bases de dados de milhas que buscadores convencionais muitas vezes não acessam simultaneamente.",
    },
    Faq {
        question: "Como funciona o preço para bebês e crianças?",
        answer: "Nossa IA aplica automaticamente as regras tarifárias: bebês menores de 2 anos (lap child) costumam pagar apenas taxas ou 10% da tarifa, enquanto crianças de 2 a 11 anos podem ter descontos variados dependendo da companhia aérea.",
    },
    Faq {
        question: "O site é seguro para reservas?",
        answer: "O FlyAgente AI é uma ferramenta de busca e inteligência. Nós direcionamos você para os sites oficiais e OTAs seguras onde o preço foi encontrado, garantindo total segurança na sua compra final.",
    },
    Faq {
        question: "Posso buscar passagens com milhas?",
        answer: "Com certeza. Além do menor preço em dinheiro, nossa IA varre os principais programas de fidelidade (Smiles, TudoAzul, Latam Pass, etc) para sugerir a melhor forma de emissão.",
    },
];

pub fn faq_entries() -> Vec<FaqEntry> {
    FAQS.iter()
        .map(|f| FaqEntry {
            question: f.question.to_string(),
            answer: f.answer.to_string(),
        })
        .collect()
}

/// Legal overlays reachable from the footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegalDoc {
    Privacy,
    Terms,
}

pub struct LegalSection {
    pub heading: &'static str,
    pub body: &'static str,
}

pub struct LegalText {
    pub title: &'static str,
    pub intro: &'static str,
    pub sections: &'static [LegalSection],
}

const PRIVACY: LegalText = LegalText {
    title: "Política de Privacidade",
    intro: "Sua privacidade é importante para nós no FlyAgente AI. Esta Política de Privacidade explica como coletamos, usamos e protegemos suas informações ao utilizar nosso buscador de passagens aéreas.",
    sections: &[
        LegalSection {
            heading: "1. Coleta de Dados",
            body: "Coletamos informações básicas de busca (origem, destino, datas) para fornecer os melhores resultados de voos. Não armazenamos dados de cartões de crédito, pois todas as transações ocorrem nos sites das companhias aéreas ou agências parceiras.",
        },
        LegalSection {
            heading: "2. Google AdSense e Cookies",
            body: "Utilizamos cookies para personalizar anúncios via Google AdSense. O Google utiliza o cookie DART para veicular anúncios baseados em suas visitas a este e outros sites na internet.",
        },
        LegalSection {
            heading: "3. Links de Terceiros",
            body: "Nosso site contém links para sites externos. Não somos responsáveis pelo conteúdo ou práticas de privacidade desses sites.",
        },
        LegalSection {
            heading: "4. Segurança",
            body: "Implementamos medidas de segurança padrão da indústria para proteger as informações processadas em nossa plataforma.",
        },
    ],
};

const TERMS: LegalText = LegalText {
    title: "Termos de Uso",
    intro: "Ao acessar o FlyAgente AI, você concorda com os seguintes Termos de Uso.",
    sections: &[
        LegalSection {
            heading: "1. Natureza do Serviço",
            body: "O FlyAgente AI é uma ferramenta de busca e comparação baseada em Inteligência Artificial. Não somos uma agência de viagens ou companhia aérea. Não vendemos passagens diretamente.",
        },
        LegalSection {
            heading: "2. Precisão dos Preços",
            body: "Os preços de passagens aéreas são dinâmicos e podem mudar em segundos. Embora nossa IA busque dados em tempo real, o preço final deve ser sempre conferido no site do fornecedor antes da compra.",
        },
        LegalSection {
            heading: "3. Isenção de Responsabilidade",
            body: "Não nos responsabilizamos por cancelamentos de voos, alterações de horários ou problemas ocorridos na reserva final feita em sites de terceiros.",
        },
        LegalSection {
            heading: "4. Uso Permitido",
            body: "Este site deve ser usado apenas para fins pessoais e não comerciais. O uso de bots para raspagem de dados é estritamente proibido.",
        },
    ],
};

impl LegalDoc {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "privacy" => Some(Self::Privacy),
            "terms" => Some(Self::Terms),
            _ => None,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Privacy => "privacy",
            Self::Terms => "terms",
        }
    }

    pub fn text(self) -> &'static LegalText {
        match self {
            Self::Privacy => &PRIVACY,
            Self::Terms => &TERMS,
        }
    }

    pub fn to_response(self) -> LegalResponse {
        let text = self.text();
        LegalResponse {
            title: text.title.to_string(),
            intro: text.intro.to_string(),
            sections: text
                .sections
                .iter()
                .map(|s| LegalSectionResponse {
                    heading: s.heading.to_string(),
                    body: s.body.to_string(),
                })
                .collect(),
        }
    }
}

/// Card header for a deal
pub struct Badge {
    pub label: &'static str,
    pub css_class: &'static str,
}

pub fn badge(deal_type: DealType) -> Badge {
    match deal_type {
        DealType::CheapestCash => Badge { label: "Mais Barata (Dinheiro)", css_class: "badge-cash" },
        DealType::CheapestMiles => Badge { label: "Mais Barata (Milhas)", css_class: "badge-miles" },
        DealType::MostExpensive => Badge { label: "Tarifa Premium / Mais Cara", css_class: "badge-premium" },
    }
}
