// src/console/teams.rs

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: u8,
    pub name: &'static str,
    pub logo_url: &'static str,
}

const LOGO_BASE: &str = "https://res.cloudinary.com/dfuh1q6ic/image/upload";

macro_rules! team {
    ($id:expr, $name:expr, $path:expr) => {
        Team {
            id: $id,
            name: $name,
            logo_url: concat!("https://res.cloudinary.com/dfuh1q6ic/image/upload", $path),
        }
    };
}

// Clubes da Kenyan Premier League oferecidos no formulário de evento
pub const TEAMS: [Team; 17] = [
    team!(1, "Ulinzi Star", "/v1748097295/ulinzi-fc_gwk5px.png"),
    team!(2, "Shabana Fc", "/v1748097294/shabana-fc_u2trlq.png"),
    team!(3, "Tusker Fc", "/v1748097294/tusker-fc_cnlyrd.png"),
    team!(4, "Gor Mahia Fc", "/v1748097293/gor-fc_yaylpj.png"),
    team!(5, "Mathare United", "/v1748097293/mathare-united_ehtjuk.png"),
    team!(6, "Talanta Fc", "/v1748097292/fc-talanta_ifnlx9.png"),
    team!(7, "Kariobangi Sharks", "/v1748097292/kariobangi-sharks_cals5v.png"),
    team!(8, "Kenya Police Fc", "/v1748097291/kenya-police_btrcyb.png"),
    team!(9, "Bidco United", "/v1748097290/bidco-united_zkankj.png"),
    team!(10, "Bandari Fc", "/v1748097290/bandari-fc_dsfjg5.png"),
    team!(11, "Posta Rangers Fc", "/v1748097289/posta-rangers_vkqumx.png"),
    team!(12, "AFC Leaopards", "/v1748097288/fc-leopards_j0usxp.png"),
    team!(13, "Sofapaka Fc", "/v1748097288/sofapaka_gt9gre.png"),
    team!(14, "Kakamega Homeboyz", "/v1748097287/kakamega-homeboyz_ykdgen.png"),
    team!(15, "Mara Sugar", "/v1748097287/mara-sugar_kvvvir.png"),
    team!(16, "KCB Fc", "/v1748097287/kcb-fc_cm0hzj.png"),
    team!(17, "Muranga Seal", "/v1748097286/mseal_yqyp5v.png"),
];

pub fn find_team(name: &str) -> Option<&'static Team> {
    let name = name.trim();
    TEAMS.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Times oferecidos de um lado: todos menos o já escolhido do outro lado.
pub fn available_against(other_side: Option<&str>) -> Vec<&'static Team> {
    TEAMS
        .iter()
        .filter(|t| other_side.is_none_or(|other| !t.name.eq_ignore_ascii_case(other.trim())))
        .collect()
}

pub fn logo_host() -> &'static str {
    LOGO_BASE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_seventeen_clubs_with_cloudinary_logos() {
        assert_eq!(TEAMS.len(), 17);
        assert!(TEAMS.iter().all(|t| t.logo_url.starts_with(logo_host())));
        assert_eq!(
            find_team("muranga seal").map(|t| t.logo_url),
            Some("https://res.cloudinary.com/dfuh1q6ic/image/upload/v1748097286/mseal_yqyp5v.png")
        );
    }

    #[test]
    fn team_chosen_on_one_side_is_not_offered_on_the_other() {
        let away = available_against(Some("Muranga Seal"));
        assert_eq!(away.len(), 16);
        assert!(away.iter().all(|t| t.name != "Muranga Seal"));
        assert_eq!(available_against(None).len(), 17);
    }
}
