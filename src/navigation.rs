//! Sidebar entries, dashboard module cards and route resolution.
//!
//! All three derive from the capability matrix in `access`; nothing here
//! decides visibility on its own.

use crate::access::{self, Capability};
use crate::model::Role;
use crate::session::Session;
use crate::store::EntityStore;
use crate::views::SelectOption;
use serde::Serialize;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Dashboard,
    Students,
    Teachers,
    Schedule,
    Staff,
    Schools,
    TeacherArea,
    Inventory,
    Finance,
    Assistant,
}

impl Route {
    pub const ALL: [Route; 10] = [
        Route::Dashboard,
        Route::Students,
        Route::Teachers,
        Route::Schedule,
        Route::Staff,
        Route::Schools,
        Route::TeacherArea,
        Route::Inventory,
        Route::Finance,
        Route::Assistant,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/dashboard",
            Route::Students => "/discentes",
            Route::Teachers => "/docentes",
            Route::Schedule => "/agendamentos",
            Route::Staff => "/funcionarios",
            Route::Schools => "/escolas",
            Route::TeacherArea => "/area-professor",
            Route::Inventory => "/estoque",
            Route::Finance => "/financeiro",
            Route::Assistant => "/assistente",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Students => "Discentes",
            Route::Teachers => "Docentes",
            Route::Schedule => "Agendamentos",
            Route::Staff => "Funcionários",
            Route::Schools => "Escolas",
            Route::TeacherArea => "Área do Professor",
            Route::Inventory => "Estoque",
            Route::Finance => "Financeiro",
            Route::Assistant => "Assistente",
        }
    }

    pub fn capability(self) -> Capability {
        match self {
            Route::Dashboard => Capability::ViewDashboard,
            Route::Students => Capability::ViewStudents,
            Route::Teachers => Capability::ViewTeachers,
            Route::Schedule => Capability::ViewSchedules,
            Route::Staff => Capability::ViewStaff,
            Route::Schools => Capability::ViewSchools,
            Route::TeacherArea => Capability::ViewTeacherArea,
            Route::Inventory => Capability::ViewInventory,
            Route::Finance => Capability::ViewFinance,
            Route::Assistant => Capability::UseAssistant,
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|r| r.path() == path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavEntry {
    pub route: Route,
    pub title: &'static str,
    pub path: &'static str,
}

impl From<Route> for NavEntry {
    fn from(route: Route) -> Self {
        NavEntry {
            route,
            title: route.title(),
            path: route.path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolSelector {
    /// First option is the empty value meaning "every school".
    pub options: Vec<SelectOption>,
    pub selected: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub entries: Vec<NavEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_selector: Option<SchoolSelector>,
}

// Sidebar order; entries the role cannot open are dropped.
const SIDEBAR: [Route; 10] = [
    Route::Dashboard,
    Route::Students,
    Route::Teachers,
    Route::Schedule,
    Route::Inventory,
    Route::Staff,
    Route::Finance,
    Route::TeacherArea,
    Route::Schools,
    Route::Assistant,
];

/// Empty for an anonymous session.
pub fn menu(store: &EntityStore, session: &Session) -> Menu {
    let Some(role) = session.role() else {
        return Menu {
            entries: Vec::new(),
            school_selector: None,
        };
    };
    let entries = SIDEBAR
        .into_iter()
        .filter(|r| access::allows(role, r.capability()))
        .map(NavEntry::from)
        .collect();

    let school_selector = access::allows(role, Capability::SwitchSchoolScope).then(|| {
        let mut options = vec![SelectOption {
            value: String::new(),
            label: "Todas as Escolas".to_string(),
        }];
        options.extend(store.schools().iter().map(|s| SelectOption {
            value: s.id.clone(),
            label: s.name.clone(),
        }));
        SchoolSelector {
            options,
            selected: session.selected_school().map(|s| s.id.clone()),
        }
    });

    Menu {
        entries,
        school_selector,
    }
}

/// Dashboard module cards. Teachers get their own short list.
pub fn modules(session: &Session) -> Vec<NavEntry> {
    let cards: &[Route] = match session.role() {
        None => &[],
        Some(Role::Teacher) => &[
            Route::TeacherArea,
            Route::Students,
            Route::Schedule,
            Route::Assistant,
        ],
        Some(Role::Director) | Some(Role::Secretary) => &[
            Route::Students,
            Route::Teachers,
            Route::Schedule,
            Route::Inventory,
            Route::Staff,
            Route::Finance,
            Route::Assistant,
            Route::Schools,
        ],
    };
    let role = session.role();
    cards
        .iter()
        .copied()
        .filter(|r| role.is_some_and(|role| access::allows(role, r.capability())))
        .map(NavEntry::from)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteAccess {
    Granted,
    Denied,
}

/// What gets rendered: the login form or one of the routed screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Login,
    #[serde(untagged)]
    Route(Route),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Resolution {
    Render { render: Page, access: RouteAccess },
    Redirect { redirect: &'static str },
}

/// Where the UI should go for `path` given the session.
///
/// Denied routes still render: the screen shows its access notice in place
/// of content, the way the finance and schools screens do.
pub fn resolve(path: &str, session: &Session) -> Resolution {
    let trimmed = path.trim();
    let normalized = match trimmed.trim_end_matches('/') {
        "" => "/",
        p => p,
    };
    let authenticated = session.is_authenticated();

    if normalized == "/" {
        return Resolution::Redirect { redirect: HOME_PATH };
    }
    if normalized == LOGIN_PATH {
        return if authenticated {
            Resolution::Redirect { redirect: HOME_PATH }
        } else {
            Resolution::Render {
                render: Page::Login,
                access: RouteAccess::Granted,
            }
        };
    }
    let Some(route) = Route::from_path(normalized) else {
        return Resolution::Redirect {
            redirect: if authenticated { HOME_PATH } else { LOGIN_PATH },
        };
    };
    let Some(role) = session.role() else {
        return Resolution::Redirect { redirect: LOGIN_PATH };
    };
    let access = if access::allows(role, route.capability()) {
        RouteAccess::Granted
    } else {
        RouteAccess::Denied
    };
    Resolution::Render {
        render: Page::Route(route),
        access,
    }
}
