// src/query/queries.rs

use std::sync::Arc;

use crate::{
    api::{AdminApi, AuthApi, EventsApi, MembershipsApi, MerchandiseApi, OrdersApi, StaffApi},
    models::{
        auth::AdminProfile, event::Event, membership::Membership, merchandise::Merchandise,
        order::Order, staff::Staff, ListEnvelope,
    },
    query::cache::{Query, QueryFuture, QueryKey},
};

pub struct AdminInfoQuery;
pub struct EventsQuery;
pub struct MerchandiseQuery;
pub struct MembershipsQuery;
pub struct OrdersQuery;
pub struct StaffQuery;

impl Query for AdminInfoQuery {
    type Output = AdminProfile;
    const KEY: QueryKey = QueryKey::AdminInfo;

    fn fetch(api: Arc<dyn AdminApi>) -> QueryFuture<Self::Output> {
        Box::pin(async move { api.fetch_admin_info().await })
    }
}

impl Query for EventsQuery {
    type Output = ListEnvelope<Event>;
    const KEY: QueryKey = QueryKey::AllEvents;

    fn fetch(api: Arc<dyn AdminApi>) -> QueryFuture<Self::Output> {
        Box::pin(async move { api.fetch_events().await })
    }
}

impl Query for MerchandiseQuery {
    type Output = ListEnvelope<Merchandise>;
    const KEY: QueryKey = QueryKey::AllMerchandise;

    fn fetch(api: Arc<dyn AdminApi>) -> QueryFuture<Self::Output> {
        Box::pin(async move { api.fetch_merchandise().await })
    }
}

impl Query for MembershipsQuery {
    type Output = ListEnvelope<Membership>;
    const KEY: QueryKey = QueryKey::AllMemberships;

    fn fetch(api: Arc<dyn AdminApi>) -> QueryFuture<Self::Output> {
        Box::pin(async move { api.fetch_memberships().await })
    }
}

impl Query for OrdersQuery {
    type Output = ListEnvelope<Order>;
    const KEY: QueryKey = QueryKey::Orders;

    fn fetch(api: Arc<dyn AdminApi>) -> QueryFuture<Self::Output> {
        Box::pin(async move { api.fetch_orders().await })
    }
}

impl Query for StaffQuery {
    type Output = ListEnvelope<Staff>;
    const KEY: QueryKey = QueryKey::AllStaff;

    fn fetch(api: Arc<dyn AdminApi>) -> QueryFuture<Self::Output> {
        Box::pin(async move { api.fetch_all_staff().await })
    }
}
