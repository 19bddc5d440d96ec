// src/console/memberships.rs

use serde::{Deserialize, Serialize};

use crate::{
    common::display::{capitalize, format_short_date, mask_except_last_four, parse_api_date},
    console::{
        badges::{card_status_variant, tier_variant, Badge},
        table::{distinct, selected, ResourceTable, TablePage, TableRecord},
    },
    models::membership::Membership,
};

impl TableRecord for Membership {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn set_record_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.email.clone()]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MembershipFilters {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub tier: Option<String>,
    // "needs-card" / "no-card"
    pub card: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRow {
    pub id: String,
    pub masked_id: String,
    pub name: String,
    pub email: String,
    pub join_date_label: String,
    pub tier: Badge,
    // None quando o sócio não pediu cartão físico ("N/A" na tela)
    pub card_status: Option<Badge>,
    pub lock_requested: bool,
}

impl From<Membership> for MembershipRow {
    fn from(member: Membership) -> Self {
        let join_date_label = member
            .join_date
            .as_deref()
            .map(|raw| parse_api_date(raw).map(format_short_date).unwrap_or_else(|| raw.to_string()))
            .unwrap_or_else(|| "N/A".to_string());

        let card_status = member
            .needs_physical_card
            .then(|| Badge::new(capitalize(&member.card_status), card_status_variant(&member.card_status)));

        Self {
            masked_id: mask_except_last_four(Some(&member.id)),
            tier: Badge::new(capitalize(&member.tier), tier_variant(&member.tier)),
            card_status,
            join_date_label,
            id: member.id,
            name: member.name,
            email: member.email,
            lock_requested: member.lock_requested,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipsView {
    pub types: Vec<String>,
    pub table: TablePage<MembershipRow>,
}

pub fn memberships_view(
    members: &[Membership],
    filters: &MembershipFilters,
    page_size: usize,
    empty_message: &str,
) -> MembershipsView {
    let tier = selected(filters.tier.as_deref()).map(str::to_string);
    let card = selected(filters.card.as_deref()).map(str::to_string);

    let table = ResourceTable::new(members, page_size)
        .search(filters.search.as_deref())
        .filter(move |m: &Membership| match &tier {
            Some(wanted) => m.tier == *wanted,
            None => true,
        })
        .filter(move |m: &Membership| match card.as_deref() {
            Some("needs-card") => m.needs_physical_card,
            Some("no-card") => !m.needs_physical_card,
            Some(_) => false,
            None => true,
        })
        .page(filters.page.unwrap_or(1), empty_message)
        .map(MembershipRow::from);

    MembershipsView {
        types: distinct(members, |m| m.tier.as_str()),
        table,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::badges::BadgeVariant;
    use crate::test_support::in_memory_backend::InMemoryBackend;
    use rstest::rstest;

    #[rstest]
    #[case(Some("needs-card"), 2)]
    #[case(Some("no-card"), 1)]
    #[case(Some("all"), 3)]
    #[case(None, 3)]
    fn card_filter(#[case] card: Option<&str>, #[case] expected: usize) {
        let members = InMemoryBackend::seeded().memberships();
        let view = memberships_view(
            &members,
            &MembershipFilters { card: card.map(str::to_string), ..Default::default() },
            5,
            "none",
        );
        assert_eq!(view.table.total_matches, expected);
    }

    #[test]
    fn search_by_email_and_type_filter() {
        let members = InMemoryBackend::seeded().memberships();

        let by_email = memberships_view(
            &members,
            &MembershipFilters { search: Some("OTIENO@".into()), ..Default::default() },
            5,
            "none",
        );
        assert_eq!(by_email.table.rows[0].name, "Otieno Brian");

        let vip = memberships_view(
            &members,
            &MembershipFilters { tier: Some("vip".into()), ..Default::default() },
            5,
            "none",
        );
        assert_eq!(vip.table.total_matches, 1);
        assert_eq!(vip.types, vec!["standard", "premium", "vip"]);
    }

    #[test]
    fn rows_mask_id_and_hide_card_status_without_physical_card() {
        let members = InMemoryBackend::seeded().memberships();
        let view = memberships_view(&members, &MembershipFilters::default(), 5, "none");

        let jane = &view.table.rows[0];
        assert_eq!(jane.masked_id, "****c4d5");
        assert_eq!(jane.tier, Badge::new("Standard", BadgeVariant::Outline));
        assert_eq!(jane.card_status, Some(Badge::new("Pending", BadgeVariant::Outline)));
        assert_eq!(jane.join_date_label, "Jan 10, 2025");

        let brian = &view.table.rows[1];
        assert_eq!(brian.card_status, None);
    }
}
