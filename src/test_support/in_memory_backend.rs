// src/test_support/in_memory_backend.rs

// API remota do clube em memória, para testar cache, mutações e handlers sem rede.
// O store é compartilhado entre conexões de tokens diferentes.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::json;

use crate::{
    api::{AdminApi, AuthApi, Connector, EventsApi, MembershipsApi, MerchandiseApi, OrdersApi, StaffApi},
    common::error::ApiError,
    models::{
        auth::{AdminProfile, AdminSignUp, AuthResponse, AuthUser, PasswordSignIn, Receipt, SignInRequest, VerifyCodeRequest},
        event::{Event, NewEvent},
        membership::{Membership, NewMembership},
        merchandise::{Merchandise, NewMerchandise},
        order::Order,
        staff::{Staff, StaffSignUp},
        ListEnvelope,
    },
    query::QueryKey,
};

pub const VALID_TOKEN: &str = "token-admin-1";
pub const VALID_CODE: &str = "123456";
pub const ADMIN_EMAIL: &str = "admin@mseal.co.ke";

#[derive(Default)]
struct Store {
    events: Vec<Event>,
    merchandise: Vec<Merchandise>,
    memberships: Vec<Membership>,
    orders: Vec<Order>,
    staff: Vec<Staff>,
    fetches: HashMap<QueryKey, usize>,
    calls: Vec<String>,
    rejection: Option<ApiError>,
    next_id: usize,
}

#[derive(Clone, Default)]
pub struct InMemoryBackend {
    store: Arc<Mutex<Store>>,
    offline: Arc<AtomicBool>,
    token: Option<String>,
}

impl InMemoryBackend {
    pub fn empty() -> Self {
        Self {
            token: Some(VALID_TOKEN.to_string()),
            ..Self::default()
        }
    }

    pub fn seeded() -> Self {
        let backend = Self::empty();
        {
            let mut store = backend.store.lock().unwrap();
            store.events = vec![
                sample_event("e1", "2020-03-01"),
                sample_event("e2", "2020-04-12"),
                sample_event("e3", "2031-01-20"),
                sample_event("e4", "2031-02-14"),
                sample_event("e5", "2031-03-08"),
                sample_event("e6", "2031-04-19"),
                sample_event("e7", "2031-05-30"),
            ];
            store.merchandise = vec![
                sample_merchandise("m1", "Cap", "Accessories", 5),
                sample_merchandise("m2", "Jersey", "Jersey", 0),
            ];
            store.memberships = vec![
                sample_membership("65f1a2b3c4d5", "Jane Wanjiku", "standard", true),
                sample_membership("65f1a2b3c4d6", "Otieno Brian", "premium", false),
                sample_membership("65f1a2b3c4d7", "Achieng Mercy", "vip", true),
            ];
            store.orders = vec![
                sample_order("o1", "ORD-001", "Processing", "Peter", "Kamau"),
                sample_order("o2", "ORD-002", "Pending", "Grace", "Njeri"),
                sample_order("o3", "ORD-003", "Delivered", "Peter", "Otieno"),
                sample_order("o4", "ORD-004", "Processing", "Lucy", "Wambui"),
            ];
            store.staff = vec![
                sample_staff("s1", "John", "Mwangi", "john@mseal.co.ke", "0711000001"),
                sample_staff("s2", "Mary", "Atieno", "mary@mseal.co.ke", "0722000002"),
            ];
        }
        backend
    }

    /// Mesmo store, outra conexão (outro token).
    pub fn with_token(&self, token: Option<&str>) -> Self {
        Self {
            store: self.store.clone(),
            offline: self.offline.clone(),
            token: token.map(str::to_string),
        }
    }

    pub fn connector(&self) -> Arc<dyn Connector> {
        Arc::new(self.clone())
    }

    pub fn toggle_offline(&self) {
        let current = self.offline.load(Ordering::SeqCst);
        self.offline.store(!current, Ordering::SeqCst);
    }

    /// A próxima chamada falha com este erro (depois volta ao normal).
    pub fn reject_next(&self, error: ApiError) {
        self.store.lock().unwrap().rejection = Some(error);
    }

    pub fn fetch_count(&self, key: QueryKey) -> usize {
        self.store.lock().unwrap().fetches.get(&key).copied().unwrap_or(0)
    }

    pub fn calls(&self) -> Vec<String> {
        self.store.lock().unwrap().calls.clone()
    }

    pub fn events(&self) -> Vec<Event> {
        self.store.lock().unwrap().events.clone()
    }

    pub fn insert_event(&self, event: Event) {
        self.store.lock().unwrap().events.push(event);
    }

    pub fn merchandise(&self) -> Vec<Merchandise> {
        self.store.lock().unwrap().merchandise.clone()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.store.lock().unwrap().orders.clone()
    }

    pub fn memberships(&self) -> Vec<Membership> {
        self.store.lock().unwrap().memberships.clone()
    }

    fn count_fetch(&self, key: QueryKey) {
        *self.store.lock().unwrap().fetches.entry(key).or_insert(0) += 1;
    }

    // Offline e rejeições valem para qualquer chamada
    fn gate(&self, call: String) -> Result<(), ApiError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::no_response());
        }
        let mut store = self.store.lock().unwrap();
        store.calls.push(call);
        match store.rejection.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        format!("{}-{}", prefix, store.next_id)
    }
}

impl Connector for InMemoryBackend {
    fn connect(&self, token: Option<&str>) -> Arc<dyn AdminApi> {
        Arc::new(self.with_token(token))
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::new(404, format!("{} not found", what))
}

fn receipt(message: &str) -> Receipt {
    Receipt { message: Some(message.to_string()) }
}

#[async_trait]
impl AuthApi for InMemoryBackend {
    async fn fetch_admin_info(&self) -> Result<AdminProfile, ApiError> {
        self.count_fetch(QueryKey::AdminInfo);
        self.gate("fetch_admin_info".into())?;
        if self.token.as_deref() != Some(VALID_TOKEN) {
            return Err(ApiError::new(401, "Unauthorized"));
        }
        Ok(admin_profile())
    }

    async fn sign_in_admin(&self, credentials: &PasswordSignIn) -> Result<AuthResponse, ApiError> {
        self.gate(format!("sign_in_admin:{}", credentials.email))?;
        if credentials.email != ADMIN_EMAIL {
            return Err(ApiError::new(401, "Invalid credentials"));
        }
        Ok(auth_response())
    }

    async fn send_sign_in_code(&self, request: &SignInRequest) -> Result<Receipt, ApiError> {
        self.gate(format!("send_sign_in_code:{}", request.email))?;
        Ok(receipt("Verification code sent"))
    }

    async fn verify_code(&self, request: &VerifyCodeRequest) -> Result<AuthResponse, ApiError> {
        self.gate(format!("verify_code:{}:{}", request.email, request.code))?;
        if request.code != VALID_CODE || request.email != ADMIN_EMAIL {
            return Err(ApiError::new(400, "Invalid or expired code"));
        }
        Ok(auth_response())
    }

    async fn sign_up_admin(&self, input: &AdminSignUp) -> Result<AuthResponse, ApiError> {
        self.gate(format!("sign_up_admin:{}", input.email))?;
        Ok(AuthResponse {
            message: Some("Admin registered".into()),
            ..AuthResponse::default()
        })
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.gate("logout".into())
    }
}

#[async_trait]
impl EventsApi for InMemoryBackend {
    async fn fetch_events(&self) -> Result<ListEnvelope<Event>, ApiError> {
        self.count_fetch(QueryKey::AllEvents);
        self.gate("fetch_events".into())?;
        Ok(ListEnvelope::new(self.events()))
    }

    async fn create_event(&self, input: &NewEvent) -> Result<Receipt, ApiError> {
        self.gate(format!("create_event:{} vs {}", input.home_team, input.away_team))?;
        let event = Event {
            id: self.next_id("e"),
            home_team: input.home_team.clone(),
            away_team: input.away_team.clone(),
            date: input.date.clone(),
            time: input.time.clone(),
            venue: input.venue.clone(),
            ticket_price: input.ticket_price,
            available_tickets: input.available_tickets,
            total_tickets: input.available_tickets,
            home_logo_url: input.home_logo_url.clone(),
            opponent_logo_url: input.opponent_logo_url.clone(),
        };
        self.insert_event(event);
        Ok(receipt("Event created"))
    }

    async fn edit_event(&self, item_id: &str, updated_item: &Event) -> Result<Receipt, ApiError> {
        self.gate(format!("edit_event:{}", item_id))?;
        let mut store = self.store.lock().unwrap();
        let slot = store.events.iter_mut().find(|e| e.id == item_id).ok_or_else(|| not_found("Event"))?;
        *slot = updated_item.clone();
        Ok(receipt("Event updated"))
    }

    async fn delete_event(&self, item_id: &str) -> Result<Receipt, ApiError> {
        self.gate(format!("delete_event:{}", item_id))?;
        let mut store = self.store.lock().unwrap();
        let before = store.events.len();
        store.events.retain(|e| e.id != item_id);
        if store.events.len() == before {
            return Err(not_found("Event"));
        }
        Ok(receipt("Event deleted"))
    }
}

#[async_trait]
impl MerchandiseApi for InMemoryBackend {
    async fn fetch_merchandise(&self) -> Result<ListEnvelope<Merchandise>, ApiError> {
        self.count_fetch(QueryKey::AllMerchandise);
        self.gate("fetch_merchandise".into())?;
        Ok(ListEnvelope::new(self.merchandise()))
    }

    async fn create_merchandise(&self, input: &NewMerchandise) -> Result<Receipt, ApiError> {
        self.gate(format!("create_merchandise:{}", input.name))?;
        let item = Merchandise {
            id: self.next_id("m"),
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            stock: input.stock,
            category: input.category.clone(),
            image_url: input.image_url.clone(),
        };
        self.store.lock().unwrap().merchandise.push(item);
        Ok(receipt("Merchandise created"))
    }

    async fn edit_merchandise(&self, item_id: &str, updated_item: &Merchandise) -> Result<Receipt, ApiError> {
        self.gate(format!("edit_merchandise:{}", item_id))?;
        let mut store = self.store.lock().unwrap();
        let slot = store
            .merchandise
            .iter_mut()
            .find(|m| m.id == item_id)
            .ok_or_else(|| not_found("Merchandise"))?;
        *slot = updated_item.clone();
        Ok(receipt("Merchandise updated"))
    }

    async fn delete_merchandise(&self, item_id: &str) -> Result<Receipt, ApiError> {
        self.gate(format!("delete_merchandise:{}", item_id))?;
        self.store.lock().unwrap().merchandise.retain(|m| m.id != item_id);
        Ok(receipt("Merchandise deleted"))
    }
}

#[async_trait]
impl MembershipsApi for InMemoryBackend {
    async fn fetch_memberships(&self) -> Result<ListEnvelope<Membership>, ApiError> {
        self.count_fetch(QueryKey::AllMemberships);
        self.gate("fetch_memberships".into())?;
        Ok(ListEnvelope::new(self.memberships()))
    }

    async fn create_membership(&self, input: &NewMembership) -> Result<Receipt, ApiError> {
        self.gate(format!("create_membership:{}", input.email))?;
        let mut member = sample_membership(&self.next_id("mb"), &input.name, &input.tier, input.needs_physical_card);
        member.email = input.email.clone();
        member.join_date = Some(input.join_date.clone());
        member.card_status = input.card_status.clone();
        self.store.lock().unwrap().memberships.push(member);
        Ok(receipt("Membership created"))
    }

    async fn delete_membership(&self, item_id: &str) -> Result<Receipt, ApiError> {
        self.gate(format!("delete_membership:{}", item_id))?;
        self.store.lock().unwrap().memberships.retain(|m| m.id != item_id);
        Ok(receipt("Member deleted"))
    }
}

#[async_trait]
impl OrdersApi for InMemoryBackend {
    async fn fetch_orders(&self) -> Result<ListEnvelope<Order>, ApiError> {
        self.count_fetch(QueryKey::Orders);
        self.gate("fetch_orders".into())?;
        Ok(ListEnvelope::new(self.orders()))
    }

    async fn update_order_status(&self, item_id: &str) -> Result<Receipt, ApiError> {
        self.gate(format!("update_order_status:{}", item_id))?;
        let mut store = self.store.lock().unwrap();
        let order = store.orders.iter_mut().find(|o| o.id == item_id).ok_or_else(|| not_found("Order"))?;
        order.status = "Fulfilled".to_string();
        Ok(receipt("Order status updated"))
    }
}

#[async_trait]
impl StaffApi for InMemoryBackend {
    async fn fetch_all_staff(&self) -> Result<ListEnvelope<Staff>, ApiError> {
        self.count_fetch(QueryKey::AllStaff);
        self.gate("fetch_all_staff".into())?;
        Ok(ListEnvelope::new(self.store.lock().unwrap().staff.clone()))
    }

    async fn sign_up_staff(&self, input: &StaffSignUp) -> Result<Receipt, ApiError> {
        self.gate(format!("sign_up_staff:{}", input.email))?;
        let staff = sample_staff(
            &self.next_id("s"),
            &input.first_name,
            &input.last_name,
            &input.email,
            &input.phone_number,
        );
        self.store.lock().unwrap().staff.push(staff);
        Ok(receipt("Staff registered"))
    }
}

// --- Fixtures ---

pub fn admin_profile() -> AdminProfile {
    AdminProfile {
        id: "a1".into(),
        first_name: "Ann".into(),
        last_name: "Mwangi".into(),
        email: ADMIN_EMAIL.into(),
        phone_number: Some("0700000000".into()),
        role: Some("admin".into()),
    }
}

fn auth_response() -> AuthResponse {
    AuthResponse {
        token: Some(VALID_TOKEN.into()),
        user: AuthUser {
            user_id: Some("a1".into()),
            email: Some(ADMIN_EMAIL.into()),
            ..AuthUser::default()
        },
        message: Some("Signed in".into()),
    }
}

pub fn sample_event(id: &str, date: &str) -> Event {
    Event {
        id: id.into(),
        home_team: "Muranga Seal".into(),
        away_team: format!("Opponent {}", id),
        date: date.into(),
        time: "15:00".into(),
        venue: "Sportpesa Arena".into(),
        ticket_price: Decimal::from(300),
        available_tickets: 150,
        total_tickets: 200,
        home_logo_url: None,
        opponent_logo_url: None,
    }
}

pub fn sample_merchandise(id: &str, name: &str, category: &str, stock: i64) -> Merchandise {
    Merchandise {
        id: id.into(),
        name: name.into(),
        description: format!("Official {}", name.to_lowercase()),
        price: Decimal::from(1500),
        stock,
        category: category.into(),
        image_url: None,
    }
}

pub fn sample_membership(id: &str, name: &str, tier: &str, needs_card: bool) -> Membership {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "email": format!("{}@fans.co.ke", name.split(' ').next().unwrap_or("fan").to_lowercase()),
        "joinDate": "2025-01-10",
        "type": tier,
        "needsPhysicalCard": needs_card,
        "cardStatus": "pending",
        "lockRequested": false,
        "expDate": "2026-01-10",
        "qrcode": format!("QR-{}", id),
        "cardNumber": "4000123412341234",
        "membershipTier": "gold",
        "ecryptWalletId": "bXNlYWwtd2FsbGV0LXRva2Vu"
    }))
    .unwrap()
}

pub fn sample_order(id: &str, order_id: &str, status: &str, first: &str, last: &str) -> Order {
    serde_json::from_value(json!({
        "_id": id,
        "orderId": order_id,
        "createdAt": "2025-05-15T10:00:00.000Z",
        "userInfo": { "firstName": first, "lastName": last, "phoneNumber": "0712345678", "email": "buyer@fans.co.ke" },
        "items": [{ "productId": "m2", "quantity": 2, "price": 3000 }],
        "totalAmount": 6000,
        "status": status,
        "paymentStatus": "Completed",
        "shippingAddress": { "street": "Kenyatta Ave", "city": "Murang'a", "country": "Kenya" }
    }))
    .unwrap()
}

pub fn sample_staff(id: &str, first: &str, last: &str, email: &str, phone: &str) -> Staff {
    Staff {
        id: id.into(),
        first_name: first.into(),
        last_name: last.into(),
        email: email.into(),
        phone_number: phone.into(),
        created_at: Some("2025-02-01T08:00:00.000Z".into()),
    }
}
