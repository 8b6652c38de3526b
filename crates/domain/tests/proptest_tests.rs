//! Property-based tests for the policy engine and placement validator
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{
    Action, Boundary, Coordinates, DecisionReason, EntityId, GeoPoint, Principal, QueryConstraint,
    Resource, ResourceKind, Role, decide, scope_filter, validate_placement,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Small id pools so that equal references actually occur
fn id_from(pool: &'static [&'static str]) -> impl Strategy<Value = EntityId> {
    prop::sample::select(pool).prop_map(EntityId::from)
}

fn principal_ids() -> impl Strategy<Value = EntityId> {
    id_from(&["u1", "u2", "u3"])
}

fn organizations() -> impl Strategy<Value = EntityId> {
    id_from(&["o1", "o2"])
}

fn domains() -> impl Strategy<Value = EntityId> {
    id_from(&["d1", "d2", "d3"])
}

fn resource_ids() -> impl Strategy<Value = EntityId> {
    id_from(&["u1", "u2", "d1", "d2", "p1", "p2", "p3", "x"])
}

fn roles() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

fn kinds() -> impl Strategy<Value = ResourceKind> {
    prop::sample::select(ResourceKind::ALL.to_vec())
}

fn actions() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

fn catalog_kinds() -> impl Strategy<Value = ResourceKind> {
    prop::sample::select(vec![
        ResourceKind::Category,
        ResourceKind::PlantType,
        ResourceKind::PlantVariety,
        ResourceKind::Plant,
    ])
}

prop_compose! {
    /// Any principal, including ones that violate their role's invariants
    fn principals()(
        id in principal_ids(),
        role in roles(),
        organization in prop::option::of(organizations()),
        domain in prop::option::of(domains()),
        plots in prop::collection::vec(id_from(&["p1", "p2", "p3"]), 0..3),
    ) -> Principal {
        let mut principal = Principal::new(id, role).with_plots(plots);
        if let Some(organization) = organization {
            principal = principal.with_organization(organization);
        }
        if let Some(domain) = domain {
            principal = principal.with_domain(domain);
        }
        principal
    }
}

prop_compose! {
    fn well_formed_app_users()(
        id in principal_ids(),
        organization in organizations(),
        domain in domains(),
        plots in prop::collection::vec(id_from(&["p1", "p2", "p3"]), 1..3),
    ) -> Principal {
        Principal::new(id, Role::ApplicationUser)
            .with_organization(organization)
            .with_domain(domain)
            .with_plots(plots)
    }
}

prop_compose! {
    fn resources_of(kind: ResourceKind)(
        id in prop::option::of(resource_ids()),
        organization in prop::option::of(organizations()),
        domain in prop::option::of(domains()),
        creator in prop::option::of(principal_ids()),
        role in prop::option::of(roles()),
    ) -> Resource {
        let mut resource = Resource::new(kind);
        if let Some(id) = id {
            resource = resource.with_id(id);
        }
        if let Some(organization) = organization {
            resource = resource.in_organization(organization);
        }
        if let Some(domain) = domain {
            resource = resource.in_domain(domain);
        }
        if let Some(creator) = creator {
            resource = resource.created_by(creator);
        }
        if let Some(role) = role {
            resource = resource.with_role(role);
        }
        resource
    }
}

fn resources() -> impl Strategy<Value = Resource> {
    kinds().prop_flat_map(resources_of)
}

// ============================================================================
// Authorization Property Tests
// ============================================================================

mod authorization_tests {
    use super::*;

    proptest! {
        #[test]
        fn super_admin_is_universal_except_self_deletion(
            id in principal_ids(),
            resource in resources(),
            action in actions()
        ) {
            let root = Principal::super_admin(id);
            let decision = decide(&root, &resource, action);
            let own_delete = action == Action::Delete && resource.is_account_of(root.id());
            prop_assert_eq!(decision.allowed, !own_delete);
        }

        #[test]
        fn nobody_deletes_their_own_account(principal in principals()) {
            let account = Resource::user(principal.id().clone(), principal.role())
                .in_organization("o1")
                .in_domain("d1");
            prop_assert!(decide(&principal, &account, Action::Delete).is_denied());
        }

        #[test]
        fn org_admin_is_fenced_to_its_organization(
            organization in organizations(),
            resource in resources(),
            action in actions()
        ) {
            let admin = Principal::new("admin", Role::OrgAdmin).with_organization(organization.clone());
            if resource.organization_id() != Some(&organization) {
                prop_assert!(decide(&admin, &resource, action).is_denied());
            }
        }

        #[test]
        fn app_user_mutation_is_gated_by_authorship(
            user in well_formed_app_users(),
            kind in catalog_kinds(),
            organization in organizations(),
            creator in prop::option::of(principal_ids()),
            mutation in prop::sample::select(vec![Action::Update, Action::Delete])
        ) {
            let mut resource = Resource::new(kind).with_id("x").in_organization(organization.clone());
            if let Some(creator) = &creator {
                resource = resource.created_by(creator.clone());
            }
            let expected = user.organization_id() == Some(&organization)
                && creator.as_ref() == Some(user.id());
            prop_assert_eq!(decide(&user, &resource, mutation).allowed, expected);
        }

        #[test]
        fn app_user_creates_only_in_own_organization(
            user in well_formed_app_users(),
            kind in catalog_kinds(),
            organization in organizations()
        ) {
            let draft = Resource::new(kind).in_organization(organization.clone());
            let decision = decide(&user, &draft, Action::Create);
            prop_assert_eq!(decision.allowed, user.organization_id() == Some(&organization));
            if !decision.allowed {
                prop_assert_eq!(decision.reason, DecisionReason::OrganizationMismatch);
            }
        }

        #[test]
        fn decisions_are_deterministic(
            principal in principals(),
            resource in resources(),
            action in actions()
        ) {
            prop_assert_eq!(
                decide(&principal, &resource, action),
                decide(&principal, &resource, action)
            );
        }

        #[test]
        fn integrity_faults_never_allow(
            principal in principals(),
            resource in resources(),
            action in actions()
        ) {
            let decision = decide(&principal, &resource, action);
            if decision.is_integrity_fault() {
                prop_assert!(principal.missing_attribute().is_some());
            }
        }
    }
}

// ============================================================================
// Reference Normalization Property Tests
// ============================================================================

mod normalization_tests {
    use super::*;

    proptest! {
        #[test]
        fn populated_and_bare_references_decide_alike(
            role in prop::sample::select(vec!["org_admin", "DomainAdmin", "application_user"]),
            organization in "[a-f0-9]{24}",
            domain in "[a-f0-9]{24}",
            plot in "[a-f0-9]{24}",
            name in "[A-Za-z ]{1,16}",
            action in actions()
        ) {
            let bare = serde_json::json!({
                "id": "u1",
                "role": role,
                "organizationId": organization,
                "domainId": domain,
                "plotIds": [plot],
            });
            let populated = serde_json::json!({
                "_id": "u1",
                "role": role,
                "organizationId": { "_id": organization, "name": name },
                "domainId": { "_id": { "$oid": domain } },
                "plotIds": [{ "_id": plot, "name": name }],
            });

            let bare: Principal = serde_json::from_value(bare).unwrap();
            let populated: Principal = serde_json::from_value(populated).unwrap();
            prop_assert_eq!(&bare, &populated);

            let resource: Resource = serde_json::from_value(serde_json::json!({
                "kind": "plot",
                "_id": plot,
                "organizationId": { "_id": organization },
                "domainId": domain,
            })).unwrap();
            prop_assert_eq!(
                decide(&bare, &resource, action),
                decide(&populated, &resource, action)
            );
        }
    }
}

// ============================================================================
// Scope Filter Property Tests
// ============================================================================

mod scope_tests {
    use super::*;

    proptest! {
        #[test]
        fn scope_filter_agrees_with_read_decision(
            principal in principals(),
            (kind, resource) in kinds().prop_flat_map(|kind| (Just(kind), resources_of(kind)))
        ) {
            let filter = scope_filter(&principal, kind);
            let allowed = decide(&principal, &resource, Action::Read).allowed;
            prop_assert_eq!(filter.matches(&resource), allowed);
            prop_assert_eq!(filter.constraint().matches(&resource), allowed);
        }

        #[test]
        fn nothing_constraint_hides_everything(
            principal in principals(),
            (kind, resource) in kinds().prop_flat_map(|kind| (Just(kind), resources_of(kind)))
        ) {
            let constraint = QueryConstraint::compile(&principal, kind);
            if constraint.is_nothing() {
                prop_assert!(decide(&principal, &resource, Action::Read).is_denied());
            }
        }
    }
}

// ============================================================================
// Placement Property Tests
// ============================================================================

mod placement_tests {
    use super::*;

    proptest! {
        #[test]
        fn plot_center_is_always_accepted(
            lat in -85.0f64..=85.0f64,
            lon in -180.0f64..=180.0f64,
            size in prop::option::of(-100.0f64..1_000_000.0f64)
        ) {
            let center = GeoPoint::new(lat, lon).unwrap();
            let boundary = Boundary::for_plot(center, size).unwrap();
            let result = validate_placement(Coordinates::new(lat, lon), &boundary);
            prop_assert!(result.ok);
            prop_assert!(result.distance_km.is_some_and(|d| d.abs() < 1e-9));
        }

        #[test]
        fn distance_grows_along_a_bearing_and_acceptance_shrinks(
            lat in -60.0f64..=60.0f64,
            lon in -170.0f64..=170.0f64,
            radius in 0.01f64..5.0f64,
            near in 0.0f64..0.1f64,
            extra in 0.001f64..0.1f64,
            bearing in 0.0f64..std::f64::consts::TAU
        ) {
            let center = GeoPoint::new(lat, lon).unwrap();
            let boundary = Boundary::circle(center, radius, 16).unwrap();
            let at = |offset: f64| {
                Coordinates::new(lat + offset * bearing.cos(), lon + offset * bearing.sin())
            };
            let nearer = validate_placement(at(near), &boundary);
            let farther = validate_placement(at(near + extra), &boundary);

            let (d_near, d_far) = (nearer.distance_km.unwrap(), farther.distance_km.unwrap());
            prop_assert!(d_far > d_near, "{d_far} km is not beyond {d_near} km");
            prop_assert!(!farther.ok || nearer.ok);
        }

        #[test]
        fn square_corners_lie_on_the_radius(
            lat in -85.0f64..=85.0f64,
            lon in -179.0f64..=179.0f64,
            side in 10.0f64..2_000.0f64
        ) {
            let center = GeoPoint::new(lat, lon).unwrap();
            let boundary = Boundary::square(center, side).unwrap();
            for vertex in boundary.vertices() {
                let distance = center.distance_km(vertex);
                prop_assert!((distance - boundary.radius_km()).abs() <= boundary.radius_km() * 0.01);
            }
        }

        #[test]
        fn out_of_range_latitude_never_computes_distance(
            lat in prop_oneof![(-1000.0f64..-90.1f64), (90.1f64..1000.0f64)],
            lon in -180.0f64..=180.0f64
        ) {
            let boundary = Boundary::for_plot(GeoPoint::new_unchecked(0.0, 0.0), None).unwrap();
            let result = validate_placement(Coordinates::new(lat, lon), &boundary);
            prop_assert!(!result.ok);
            prop_assert!(result.distance_km.is_none());
        }

        #[test]
        fn distance_is_symmetric(
            lat1 in -90.0f64..=90.0f64,
            lon1 in -180.0f64..=180.0f64,
            lat2 in -90.0f64..=90.0f64,
            lon2 in -180.0f64..=180.0f64
        ) {
            let a = GeoPoint::new(lat1, lon1).unwrap();
            let b = GeoPoint::new(lat2, lon2).unwrap();
            prop_assert!((a.distance_km(&b) - b.distance_km(&a)).abs() < 0.001);
        }
    }
}
