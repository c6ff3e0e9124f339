use crate::helper::*;
use engine::*;
use harbor_core::*;

#[tokio::test]
async fn test_owner_registers_own_ship() {
    test(|helper, _builder| async move {
        let owner_id = UserId::new(42);

        let ship = helper
            .app
            .registry
            .register_ship(owner(owner_id), NewShip::test_default(owner_id))
            .await
            .unwrap();

        assert_eq!(ship.owner_id, owner_id);
        assert_eq!(
            helper.storage.ship(ship.id).await.unwrap(),
            Some(ship.clone())
        );
    })
    .await;
}

#[tokio::test]
async fn test_owner_cannot_register_for_someone_else() {
    test(|helper, _builder| async move {
        let error = helper
            .app
            .registry
            .register_ship(owner(UserId::new(42)), NewShip::test_default(UserId::new(43)))
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            RegistryError::RegistrationNotPermitted { .. }
        ));
    })
    .await;
}

#[tokio::test]
async fn test_operator_registers_on_behalf_of_owner() {
    test(|helper, _builder| async move {
        let ship = helper
            .app
            .registry
            .register_ship(operator(), NewShip::test_default(UserId::new(43)))
            .await
            .unwrap();

        assert_eq!(ship.owner_id, UserId::new(43));
    })
    .await;
}

#[tokio::test]
async fn test_invalid_dimensions_are_rejected() {
    test(|helper, _builder| async move {
        let owner_id = UserId::new(42);
        let mut ship = NewShip::test_default(owner_id);
        ship.draft = 31.0;

        let error = helper
            .app
            .registry
            .register_ship(owner(owner_id), ship)
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            RegistryError::Validation {
                source: ValidationError::Draft { .. },
                ..
            }
        ));
    })
    .await;
}

#[tokio::test]
async fn test_owner_updates_ship() {
    test(|helper, builder| async move {
        let state = builder.ships(1).build().await;
        let ship = &state.ships[0];

        let updated = helper
            .app
            .registry
            .update_ship(
                owner(ship.owner_id),
                ship.id,
                UpdateShip {
                    length: Some(220.0),
                    ship_type: Some(ShipType::BulkCarrier),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.length, 220.0);
        assert_eq!(updated.ship_type, ShipType::BulkCarrier);
        assert_eq!(updated.name, ship.name);
        assert_eq!(
            helper.storage.ship(ship.id).await.unwrap(),
            Some(updated)
        );
    })
    .await;
}

#[tokio::test]
async fn test_invalid_update_leaves_ship_unchanged() {
    test(|helper, builder| async move {
        let state = builder.ships(1).build().await;
        let ship = &state.ships[0];

        let error = helper
            .app
            .registry
            .update_ship(
                owner(ship.owner_id),
                ship.id,
                UpdateShip {
                    name: Some("Renamed".into()),
                    length: Some(-1.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(error, RegistryError::Validation { .. }));
        assert_eq!(
            helper.storage.ship(ship.id).await.unwrap().as_ref(),
            Some(ship)
        );
    })
    .await;
}

#[tokio::test]
async fn test_only_the_owner_updates_a_ship() {
    test(|helper, builder| async move {
        let state = builder.ships(1).build().await;

        let error = helper
            .app
            .registry
            .update_ship(admin(), state.ships[0].id, UpdateShip::default())
            .await
            .unwrap_err();

        assert!(matches!(error, RegistryError::NotOwner { .. }));
    })
    .await;
}
