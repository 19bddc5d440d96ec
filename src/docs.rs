// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::{common, console, handlers, models, services};

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Shell ---
        handlers::shell::health,
        handlers::shell::session_gate,
        handlers::shell::shell_view,
        handlers::shell::drain_toasts,

        // --- Auth ---
        handlers::auth::send_code,
        handlers::auth::verify_code,
        handlers::auth::password_sign_in,
        handlers::auth::sign_up_admin,
        handlers::auth::sign_out,

        // --- Events ---
        handlers::events::list_events,
        handlers::events::create_event,
        handlers::events::preview_event,
        handlers::events::edit_event,
        handlers::events::delete_event_prompt,
        handlers::events::delete_event,

        // --- Merchandise ---
        handlers::merchandise::list_merchandise,
        handlers::merchandise::create_merchandise,
        handlers::merchandise::preview_merchandise,
        handlers::merchandise::edit_merchandise,
        handlers::merchandise::delete_merchandise_prompt,
        handlers::merchandise::delete_merchandise,

        // --- Memberships ---
        handlers::memberships::list_memberships,
        handlers::memberships::create_membership,
        handlers::memberships::preview_membership,
        handlers::memberships::delete_membership_prompt,
        handlers::memberships::delete_membership,

        // --- Orders ---
        handlers::orders::list_orders,
        handlers::orders::order_details,
        handlers::orders::order_status_prompt,
        handlers::orders::update_order_status,

        // --- Staff ---
        handlers::staff::list_staff,
        handlers::staff::sign_up_staff,

        // --- Documents ---
        handlers::documents::membership_card_png,
        handlers::documents::membership_card_pdf,
        handlers::documents::write_membership_nfc,
        handlers::documents::export_order,
        handlers::documents::print_order,
    ),
    components(
        schemas(
            common::error::ApiError,

            // --- Auth ---
            models::auth::AdminProfile,
            models::auth::SignInRequest,
            models::auth::VerifyCodeRequest,
            models::auth::PasswordSignIn,
            models::auth::AdminSignUp,
            models::auth::AuthUser,
            models::auth::AuthResponse,
            models::auth::Receipt,

            // --- Resources ---
            models::event::EventStatus,
            models::event::Event,
            models::event::NewEvent,
            models::merchandise::Merchandise,
            models::merchandise::NewMerchandise,
            models::membership::Membership,
            models::membership::NewMembership,
            models::order::CustomerInfo,
            models::order::OrderLine,
            models::order::ShippingAddress,
            models::order::Order,
            models::staff::Staff,
            models::staff::StaffSignUp,

            // --- Console ---
            console::AuthGate,
            console::Toast,
            console::toast::ToastVariant,
            console::badges::Badge,
            console::badges::BadgeVariant,
            console::nav::NavItem,
            console::nav::ShellView,
            console::sign_in::SignInStep,
            console::sign_in::SignInView,

            // --- Payloads ---
            console::forms::EventForm,
            console::forms::MerchandiseForm,
            console::forms::MembershipForm,
            console::forms::StaffForm,
            console::forms::AdminSignUpForm,
            console::forms::SignInEmailForm,
            handlers::ConfirmPayload,
            handlers::auth::SignUpResult,

            // --- Documents ---
            services::CardSide,
            services::nfc::NfcOutcome,
        )
    ),
    tags(
        (name = "Shell", description = "Saúde, gate de autenticação, navegação e toasts"),
        (name = "Auth", description = "Login por código ou senha, cadastro e logout"),
        (name = "Events", description = "Jogos e ingressos"),
        (name = "Merchandise", description = "Produtos da loja"),
        (name = "Memberships", description = "Sócios"),
        (name = "Orders", description = "Pedidos da loja"),
        (name = "Staff", description = "Contas de funcionários"),
        (name = "Documents", description = "Cartões, NFC e exportação de pedidos")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
