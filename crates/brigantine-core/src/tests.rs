#[cfg(test)]
mod tests {
    use glam::DVec2;

    use crate::collision::{BodyLabel, CollisionCategory, CollisionFilter};
    use crate::commands::PlayerCommand;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::AudioEvent;
    use crate::state::GameStateSnapshot;
    use crate::types::{sanitize_dt, BodyHandle, Pose, SimTime};

    // ---- Collision taxonomy ----

    #[test]
    fn test_categories_are_distinct_bits() {
        let all = [
            CollisionCategory::PLAYER,
            CollisionCategory::SHIP,
            CollisionCategory::ENEMY,
            CollisionCategory::PROJECTILE,
            CollisionCategory::POWERUP,
            CollisionCategory::TREASURE,
            CollisionCategory::ISLAND,
            CollisionCategory::DECK_ELEMENT,
            CollisionCategory::SAIL_FIBER,
            CollisionCategory::MODULE,
        ];
        let mut seen = CollisionCategory::NONE;
        for category in all {
            assert_eq!(category.bits().count_ones(), 1, "{category:?} is not one bit");
            assert!(!seen.intersects(category), "{category:?} overlaps another");
            seen |= category;
        }
    }

    #[test]
    fn test_sail_fiber_ignores_player_but_stops_projectiles() {
        let fiber = BodyLabel::SailFiber.filter();
        let player = CollisionFilter::new(
            CollisionCategory::PLAYER,
            CollisionCategory::DECK_ELEMENT | CollisionCategory::SAIL_FIBER | CollisionCategory::MODULE,
        );
        let shot = BodyLabel::Projectile.filter();
        assert!(!fiber.can_collide(&player));
        assert!(!player.can_collide(&fiber));
        assert!(fiber.can_collide(&shot));
    }

    #[test]
    fn test_mast_and_modules_block_player_and_projectiles() {
        let player = CollisionFilter::new(
            CollisionCategory::PLAYER,
            CollisionCategory::DECK_ELEMENT | CollisionCategory::MODULE,
        );
        let shot = BodyLabel::Projectile.filter();
        for label in [BodyLabel::SailMast, BodyLabel::Wheel, BodyLabel::Cannon] {
            let filter = label.filter();
            assert!(filter.can_collide(&player), "{label:?} should block the player");
            assert!(filter.can_collide(&shot), "{label:?} should stop shot");
        }
    }

    #[test]
    fn test_treasure_only_meets_ships_and_player() {
        let treasure = BodyLabel::Treasure(TreasureKind::Chest).filter();
        assert!(treasure.can_collide(&BodyLabel::Hull.filter()));
        assert!(!treasure.can_collide(&BodyLabel::Projectile.filter()));
        assert!(!treasure.can_collide(&BodyLabel::SailFiber.filter()));
    }

    #[test]
    fn test_group_overrides_masks() {
        let a = BodyLabel::Hull.filter().with_group(-3);
        let b = BodyLabel::Projectile.filter().with_group(-3);
        assert!(!a.can_collide(&b), "negative shared group never collides");

        let c = BodyLabel::SailFiber.filter().with_group(2);
        let d = BodyLabel::Treasure(TreasureKind::Coin).filter().with_group(2);
        assert!(c.can_collide(&d), "positive shared group always collides");
    }

    #[test]
    fn test_body_label_string_round_trip() {
        let labels = [
            BodyLabel::Hull,
            BodyLabel::SailMast,
            BodyLabel::SailFiber,
            BodyLabel::Wheel,
            BodyLabel::Cannon,
            BodyLabel::Projectile,
            BodyLabel::Treasure(TreasureKind::Coin),
            BodyLabel::Treasure(TreasureKind::Gems),
            BodyLabel::Treasure(TreasureKind::Chest),
        ];
        for label in labels {
            assert_eq!(BodyLabel::parse(label.as_str()), Some(label));
        }
        assert_eq!(BodyLabel::parse("kraken"), None);
    }

    // ---- Types ----

    #[test]
    fn test_pose_forward() {
        let pose = Pose::new(0.0, 0.0, std::f64::consts::FRAC_PI_2);
        let forward = pose.forward();
        assert!(forward.x.abs() < 1e-12);
        assert!((forward.y - 1.0).abs() < 1e-12);
        assert_eq!(Pose::ORIGIN.position, DVec2::ZERO);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        time.advance(0.5);
        time.advance(0.25);
        assert_eq!(time.tick, 2);
        assert!((time.elapsed_secs - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(0.1), 0.1);
        assert_eq!(sanitize_dt(-1.0), 0.0);
        assert_eq!(sanitize_dt(f64::NAN), 0.0);
        assert_eq!(sanitize_dt(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_treasure_values_increase_with_size() {
        assert!(TreasureKind::Coin.value() < TreasureKind::Gems.value());
        assert!(TreasureKind::Gems.value() < TreasureKind::Chest.value());
        assert!(TreasureKind::Coin.radius() < TreasureKind::Chest.radius());
    }

    // ---- Serde ----

    #[test]
    fn test_player_command_tagged_json() {
        let json = r#"{"type":"SetSailOpenness","module":3,"openness":50.0}"#;
        let cmd: PlayerCommand = serde_json::from_str(json).unwrap();
        match cmd {
            PlayerCommand::SetSailOpenness { module, openness } => {
                assert_eq!(module, 3);
                assert_eq!(openness, 50.0);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let broadside = PlayerCommand::FireBroadside {
            ship: 0,
            side: Broadside::Port,
        };
        let json = serde_json::to_string(&broadside).unwrap();
        assert!(json.contains(r#""type":"FireBroadside""#));
        assert!(json.contains(r#""side":"Port""#));
    }

    #[test]
    fn test_audio_event_serde() {
        let event = AudioEvent::TreasureCollected {
            kind: TreasureKind::Gems,
            value: 50,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: AudioEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, GamePhase::Docked);
        assert!(back.modules.is_empty());
    }

    // ---- Errors ----

    #[test]
    fn test_error_messages() {
        let err = crate::error::PhysicsError::UnknownBody(BodyHandle(0x2a));
        assert_eq!(err.to_string(), "unknown body B0x2a");

        let err = ConfigError::Invalid {
            field: "wind_speed",
            reason: "must be non-negative".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value `wind_speed`: must be non-negative"
        );

        let parse: Result<u32, _> = serde_json::from_str("nope");
        let err: ConfigError = parse.unwrap_err().into();
        assert!(err.to_string().starts_with("config parse error"));
    }
}
