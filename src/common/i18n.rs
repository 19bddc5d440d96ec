// src/common/i18n.rs

use std::{collections::HashMap, sync::Arc};

pub const DEFAULT_LANG: &str = "en";

// Mensagens geradas pelo próprio console (toasts, diálogos, validação).
// Mensagens vindas da API remota NÃO passam por aqui.
const MESSAGES: &[(&str, &str, &str)] = &[
    // (chave, en, pt)
    ("validation.failed", "One or more fields are invalid.", "Um ou mais campos são inválidos."),
    ("auth.unauthenticated", "Please sign in to continue.", "Faça login para continuar."),
    ("record.not_found", "Record not found.", "Registro não encontrado."),
    ("dialog.confirmation_required", "Confirm the action before continuing.", "Confirme a ação antes de continuar."),
    ("dialog.delete_prompt", "Are you sure you want to delete {name}? This action cannot be undone.", "Tem certeza que deseja excluir {name}? Esta ação não pode ser desfeita."),
    ("dialog.update_status_prompt", "Are you sure you want to update the status of {name}? This action cannot be undone.", "Tem certeza que deseja atualizar o status de {name}? Esta ação não pode ser desfeita."),
    ("internal", "An unexpected error occurred. Please try again.", "Ocorreu um erro inesperado. Tente novamente."),
    ("export.failed", "Failed to {action} card. Please try again.", "Falha ao {action} o cartão. Tente novamente."),
    // Formulários
    ("form.required", "This field is required.", "Este campo é obrigatório."),
    ("form.email", "The email address is invalid.", "O e-mail fornecido é inválido."),
    ("form.not_negative", "The value cannot be negative.", "O valor não pode ser negativo."),
    ("form.image_not_allowed", "Image host is not in the allowed list.", "O domínio da imagem não está na lista permitida."),
    ("form.password_length", "The password must have at least 8 characters.", "A senha deve ter no mínimo 8 caracteres."),
    ("event.date_in_past", "Event date must be in the future", "A data do evento deve estar no futuro"),
    ("event.invalid_date", "Invalid date. Use dd/mm/yyyy.", "Data inválida. Use dd/mm/aaaa."),
    ("event.tickets_positive", "Available tickets must be greater than 0", "A quantidade de ingressos deve ser maior que 0"),
    ("event.teams_required", "Please select both home and away teams", "Selecione os times mandante e visitante"),
    ("event.same_team", "Home and away teams must be different", "Os times mandante e visitante devem ser diferentes"),
    ("event.unknown_team", "Team is not in the league catalog", "Time não encontrado no catálogo da liga"),
    // Login
    ("signin.code_incomplete", "Please enter all 6 digits", "Digite os 6 dígitos"),
    ("signin.wrong_step", "This sign-in step is not available now.", "Este passo do login não está disponível agora."),
    ("signin.title.email", "Enter Email", "Informe o e-mail"),
    ("signin.title.code", "Enter Verification Code", "Informe o código de verificação"),
    ("signin.title.success", "Signin success", "Login realizado"),
    ("signin.description.email", "Enter your email address and we'll send you a verification code", "Informe seu e-mail e enviaremos um código de verificação"),
    ("signin.description.code", "We've sent a 6-digit code to {email}", "Enviamos um código de 6 dígitos para {email}"),
    ("signin.description.success", "Login successfully, redirected to dashboard shortly", "Login realizado, você será redirecionado ao painel"),
    // Toasts
    ("toast.created", "Created!", "Criado!"),
    ("toast.updated", "Updated!", "Atualizado!"),
    ("toast.deleted", "Deleted!", "Excluído!"),
    ("toast.error", "Error", "Erro"),
    ("toast.signed_in", "Sign-In Successfully!", "Login realizado!"),
    ("toast.welcome", "Welcome to the main dashboard!", "Bem-vindo ao painel principal!"),
    ("event.created", "Event created successfully", "Evento criado com sucesso"),
    ("event.updated", "Event updated successfully.", "Evento atualizado com sucesso."),
    ("event.deleted", "Event deleted successfully.", "Evento excluído com sucesso."),
    ("merchandise.created", "Merchandise created successfully", "Produto criado com sucesso"),
    ("merchandise.updated", "Merchandise updated successfully.", "Produto atualizado com sucesso."),
    ("merchandise.deleted", "Merchandise deleted successfully.", "Produto excluído com sucesso."),
    ("membership.created", "Membership created successfully", "Sócio cadastrado com sucesso"),
    ("membership.deleted", "Member deleted successfully.", "Sócio excluído com sucesso."),
    ("order.status_updated", "Order status updated successfully.", "Status do pedido atualizado com sucesso."),
    ("order.not_unfulfilled", "Only unfulfilled orders can have their status updated.", "Só pedidos não atendidos podem ter o status atualizado."),
    ("staff.created", "Staff account created successfully", "Conta de funcionário criada com sucesso"),
    ("admin.created", "Account created successfully", "Conta criada com sucesso"),
    // Tabelas
    ("table.events.empty", "No events found. Try adjusting your filters.", "Nenhum evento encontrado. Ajuste os filtros."),
    ("table.merchandise.empty", "No merchandise found. Try adjusting your filters.", "Nenhum produto encontrado. Ajuste os filtros."),
    ("table.memberships.empty", "No members found. Try adjusting your filters.", "Nenhum sócio encontrado. Ajuste os filtros."),
    ("table.orders.empty", "No orders found", "Nenhum pedido encontrado"),
    ("table.staff.empty", "No staff found. Try adjusting your search.", "Nenhum funcionário encontrado. Ajuste a busca."),
    // NFC
    ("nfc.unsupported", "Web NFC not supported on this device or browser", "NFC não suportado neste dispositivo ou navegador"),
    ("nfc.no_token", "No encrypted token available", "Nenhum token criptografado disponível"),
    ("nfc.token_too_large", "Token too large for NFC tag (~512 bytes capacity)", "Token grande demais para a tag NFC (~512 bytes)"),
    ("nfc.written", "Encrypted token written to NFC tag!", "Token criptografado gravado na tag NFC!"),
    ("nfc.locked", "Tag locked successfully!", "Tag bloqueada com sucesso!"),
    ("nfc.failed", "Failed to write to NFC tag: {reason}", "Falha ao gravar na tag NFC: {reason}"),
];

// Store de traduções compartilhado pelo AppState (clone barato).
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: Arc<HashMap<&'static str, HashMap<&'static str, &'static str>>>,
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

impl I18nStore {
    pub fn new() -> Self {
        let mut en = HashMap::new();
        let mut pt = HashMap::new();
        for (key, en_msg, pt_msg) in MESSAGES {
            en.insert(*key, *en_msg);
            pt.insert(*key, *pt_msg);
        }

        let mut messages = HashMap::new();
        messages.insert("en", en);
        messages.insert("pt", pt);

        Self { messages: Arc::new(messages) }
    }

    /// Busca a mensagem no idioma pedido; cai para inglês e, por último, devolve a própria chave.
    pub fn get(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .and_then(|m| m.get(key))
            .or_else(|| self.messages.get(DEFAULT_LANG).and_then(|m| m.get(key)))
            .map(|m| m.to_string())
            .unwrap_or_else(|| key.to_string())
    }

    /// Igual ao `get`, substituindo `{nome}` pelos argumentos.
    pub fn format(&self, lang: &str, key: &str, args: &[(&str, &str)]) -> String {
        let mut message = self.get(lang, key);
        for (name, value) in args {
            message = message.replace(&format!("{{{}}}", name), value);
        }
        message
    }

    pub fn supports(&self, lang: &str) -> bool {
        self.messages.contains_key(lang)
    }
}
