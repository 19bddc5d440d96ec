// src/console/sign_in.rs

use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    api::{AdminApi, AuthApi},
    common::{error::AppError, i18n::I18nStore},
    console::forms::SignInEmailForm,
    models::auth::{AuthResponse, Receipt, SignInRequest, VerifyCodeRequest},
};

pub const CODE_LENGTH: usize = 6;

// ---
// CodeInput: seis casas de um dígito
// ---
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeInput {
    digits: [Option<char>; CODE_LENGTH],
    focus: usize,
}

impl CodeInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Digitação em uma casa. Mais de um caractere é ignorado;
    /// vazio limpa a casa.
    pub fn type_digit(&mut self, index: usize, input: &str) {
        if index >= CODE_LENGTH {
            return;
        }
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (None, _) => self.digits[index] = None,
            (Some(c), None) if c.is_ascii_digit() => {
                self.digits[index] = Some(c);
                if index < CODE_LENGTH - 1 {
                    self.focus = index + 1;
                }
            }
            _ => {}
        }
    }

    /// Colar: os seis primeiros caracteres, cada dígito na sua posição.
    pub fn paste(&mut self, text: &str) {
        for (index, c) in text.chars().take(CODE_LENGTH).enumerate() {
            if c.is_ascii_digit() {
                self.digits[index] = Some(c);
            }
        }
        self.focus = self
            .digits
            .iter()
            .position(Option::is_none)
            .unwrap_or(CODE_LENGTH - 1);
    }

    /// Backspace numa casa vazia volta para a anterior.
    pub fn backspace(&mut self, index: usize) {
        if index >= CODE_LENGTH {
            return;
        }
        if self.digits[index].is_some() {
            self.digits[index] = None;
            self.focus = index;
        } else if index > 0 {
            self.focus = index - 1;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// O código só existe com as seis casas preenchidas.
    pub fn code(&self) -> Option<String> {
        self.digits.iter().copied().collect()
    }

    pub fn slots(&self) -> Vec<String> {
        self.digits
            .iter()
            .map(|d| d.map(String::from).unwrap_or_default())
            .collect()
    }
}

// ---
// SignInFlow: e-mail → código → sucesso
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SignInStep {
    Email,
    Code,
    Success,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInView {
    pub step: SignInStep,
    pub title: String,
    pub description: String,
    pub email: String,
    pub code: Vec<String>,
    pub focus: usize,
    pub can_go_back: bool,
}

#[derive(Debug, Clone)]
pub struct SignInFlow {
    step: SignInStep,
    email: String,
    code: CodeInput,
}

impl Default for SignInFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl SignInFlow {
    pub fn new() -> Self {
        Self {
            step: SignInStep::Email,
            email: String::new(),
            code: CodeInput::new(),
        }
    }

    /// Retoma o passo do código (o shell HTTP não guarda o fluxo entre requisições).
    pub fn at_code(email: impl Into<String>) -> Self {
        Self {
            step: SignInStep::Code,
            email: email.into(),
            code: CodeInput::new(),
        }
    }

    pub fn step(&self) -> SignInStep {
        self.step
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn code_input(&self) -> &CodeInput {
        &self.code
    }

    pub fn code_input_mut(&mut self) -> &mut CodeInput {
        &mut self.code
    }

    pub async fn submit_email(&mut self, api: &dyn AdminApi, email: &str) -> Result<Receipt, AppError> {
        if self.step != SignInStep::Email {
            return Err(AppError::InvalidSignInStep);
        }
        let form = SignInEmailForm { email: email.trim().to_string() };
        form.validate()?;

        let receipt = api
            .send_sign_in_code(&SignInRequest { email: form.email.clone() })
            .await?;

        tracing::info!(email = %form.email, "código de login enviado");
        self.email = form.email;
        self.code.clear();
        self.step = SignInStep::Code;
        Ok(receipt)
    }

    /// Código incompleto falha aqui, sem chamar a API.
    pub async fn submit_code(&mut self, api: &dyn AdminApi) -> Result<AuthResponse, AppError> {
        if self.step != SignInStep::Code {
            return Err(AppError::InvalidSignInStep);
        }
        let code = self.code.code().ok_or(AppError::FormRejected("signin.code_incomplete"))?;

        let request = VerifyCodeRequest { email: self.email.clone(), code };
        match api.verify_code(&request).await {
            Ok(response) => {
                tracing::info!(email = %self.email, "login por código concluído");
                self.step = SignInStep::Success;
                Ok(response)
            }
            Err(err) => {
                tracing::warn!(email = %self.email, "código recusado: {}", err);
                self.code.clear();
                Err(err.into())
            }
        }
    }

    pub fn go_back(&mut self) {
        if self.step == SignInStep::Code {
            self.step = SignInStep::Email;
            self.code.clear();
        }
    }

    pub fn view(&self, i18n: &I18nStore, lang: &str) -> SignInView {
        let (title, description) = match self.step {
            SignInStep::Email => (
                i18n.get(lang, "signin.title.email"),
                i18n.get(lang, "signin.description.email"),
            ),
            SignInStep::Code => (
                i18n.get(lang, "signin.title.code"),
                i18n.format(lang, "signin.description.code", &[("email", &self.email)]),
            ),
            SignInStep::Success => (
                i18n.get(lang, "signin.title.success"),
                i18n.get(lang, "signin.description.success"),
            ),
        };
        SignInView {
            step: self.step,
            title,
            description,
            email: self.email.clone(),
            code: self.code.slots(),
            focus: self.code.focus(),
            can_go_back: self.step == SignInStep::Code,
        }
    }
}
