// ── Closed wire enumerations ──
//
// Variant order is the documented token order. Serde goes through the
// codec in both directions, so state files and API payloads holding an
// unknown token are rejected at the boundary.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::codec::{CodecError, EnumKind, WireEnum};

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident => $kind:ident {
            $( $variant:ident = $token:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            EnumIter, EnumString, IntoStaticStr, Display,
            Serialize, Deserialize,
        )]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            $( #[strum(serialize = $token)] $variant, )+
        }

        impl WireEnum for $name {
            const KIND: EnumKind = EnumKind::$kind;
        }

        impl TryFrom<String> for $name {
            type Error = CodecError;

            fn try_from(token: String) -> Result<Self, Self::Error> {
                Self::decode(&token)
            }
        }
    };
}

wire_enum! {
    /// Lifecycle status of a platform entity.
    EntityStatus => EntityStatus {
        Active = "ACTIVE",
        Archived = "ARCHIVED",
    }
}

wire_enum! {
    /// Deployment environment an entity is used in.
    Environment => Environment {
        Development = "DEVELOPMENT",
        Staging = "STAGING",
        Production = "PRODUCTION",
    }
}

wire_enum! {
    /// Who can see an ML model. `Disabled` is terminal: it is how models are retired.
    Visibility => Visibility {
        Default = "DEFAULT",
        Public = "PUBLIC",
        Private = "PRIVATE",
        Disabled = "DISABLED",
    }
}

wire_enum! {
    /// Where an ML model is served from.
    HostedBy => HostedBy {
        Anthropic = "ANTHROPIC",
        AwsBedrock = "AWS_BEDROCK",
        AzureOpenai = "AZURE_OPENAI",
        Cohere = "COHERE",
        Custom = "CUSTOM",
        FireworksAi = "FIREWORKS_AI",
        Google = "GOOGLE",
        GoogleVertexAi = "GOOGLE_VERTEX_AI",
        Groq = "GROQ",
        Huggingface = "HUGGINGFACE",
        IbmWatsonx = "IBM_WATSONX",
        Mosaicml = "MOSAICML",
        Mystic = "MYSTIC",
        Openai = "OPENAI",
        Openpipe = "OPENPIPE",
        Pyq = "PYQ",
        Replicate = "REPLICATE",
    }
}

wire_enum! {
    /// Organization that developed an ML model.
    ModelDeveloper => ModelDeveloper {
        ZeroOneAi = "01_AI",
        Amazon = "AMAZON",
        Anthropic = "ANTHROPIC",
        Cohere = "COHERE",
        Elutherai = "ELUTHERAI",
        FireworksAi = "FIREWORKS_AI",
        Google = "GOOGLE",
        Huggingface = "HUGGINGFACE",
        Ibm = "IBM",
        Meta = "META",
        MistralAi = "MISTRAL_AI",
        Mosaicml = "MOSAICML",
        NousResearch = "NOUS_RESEARCH",
        Openai = "OPENAI",
        Openchat = "OPENCHAT",
        Openpipe = "OPENPIPE",
        Tii = "TII",
        Wizardlm = "WIZARDLM",
    }
}

wire_enum! {
    /// Model family an ML model belongs to.
    ModelFamily => ModelFamily {
        Capybara = "CAPYBARA",
        ChatGpt = "CHAT_GPT",
        Claude = "CLAUDE",
        Cohere = "COHERE",
        Falcon = "FALCON",
        Gemini = "GEMINI",
        Granite = "GRANITE",
        Gpt3 = "GPT3",
        Fireworks = "FIREWORKS",
        Llama2 = "LLAMA2",
        Llama3 = "LLAMA3",
        Mistral = "MISTRAL",
        Mpt = "MPT",
        Openchat = "OPENCHAT",
        Palm = "PALM",
        Solar = "SOLAR",
        Titan = "TITAN",
        Wizard = "WIZARD",
        Yi = "YI",
        Zephyr = "ZEPHYR",
    }
}

wire_enum! {
    /// Capability advertised in an ML model's execution config.
    ModelFeature => ModelFeature {
        Text = "TEXT",
        Chat = "CHAT",
        FunctionCalling = "FUNCTION_CALLING",
        Images = "IMAGES",
    }
}
