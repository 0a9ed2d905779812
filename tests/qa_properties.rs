//! Property tests for the reactive layer and the physics formulas.

use physdemo::domains::fluid;
use physdemo::prelude::*;
use physdemo::reactive::Slider;
use proptest::prelude::*;

proptest! {
    /// After a change notification the value mirrors the clamped control.
    #[test]
    fn prop_changeable_mirrors_control(input in -100.0f64..100.0) {
        let c = Changeable::new(
            "x",
            "x =",
            Control::Slider(Slider::float(1.0, -10.0, 10.0, 0.1)),
            -2,
            "cm",
        );
        let event = c.on_control_changed(&ControlInput::Float(input)).unwrap();
        prop_assert_eq!(c.value(), c.control_value());
        prop_assert_eq!(event.new_value, input.clamp(-10.0, 10.0));
        prop_assert!((c.real() - c.value() * 1e-2).abs() < 1e-12);
    }

    /// A container view is the active subsequence of its members, in order.
    #[test]
    fn prop_container_view_is_active_subsequence(active in prop::collection::vec(any::<bool>(), 1..12)) {
        let members: Vec<Changeable> = (0..active.len())
            .map(|i| {
                Changeable::new(
                    format!("c{i}"),
                    "",
                    Control::Slider(Slider::int(0, 0, 10, 1)),
                    0,
                    "",
                )
            })
            .collect();
        let mut container = ChangeableContainer::new(members.clone());
        for (member, flag) in members.iter().zip(&active) {
            member.set_active(*flag);
        }
        container.update();

        let expected: Vec<String> = members
            .iter()
            .zip(&active)
            .filter(|(_, flag)| **flag)
            .map(|(m, _)| m.name())
            .collect();
        let rendered: Vec<String> = container.view().names().into_iter().map(str::to_string).collect();
        prop_assert_eq!(rendered, expected);
    }

    /// Continuity conserves the volumetric flow.
    #[test]
    fn prop_continuity_conserves_flow(d1 in 0.01f64..1.0, d2 in 0.01f64..1.0, u1 in 0.5f64..30.0) {
        let a1 = fluid::circle_area(d1).unwrap();
        let a2 = fluid::circle_area(d2).unwrap();
        let u2 = fluid::continuity_velocity(a1, a2, u1).unwrap();
        let q1 = fluid::volumetric_flow(a1, u1);
        let q2 = fluid::volumetric_flow(a2, u2);
        prop_assert!((q1 - q2).abs() <= 1e-12 * q1);
    }

    /// calculate() is repeatable for any slider position.
    #[test]
    fn prop_calculate_repeatable(q in 0.01f64..1.0, holes in 5i64..50) {
        let config = DemoConfig::builder().animations(false).build();
        let model = TankModel::from_config(&config);
        model.find("q").unwrap().on_control_changed(&ControlInput::Float(q)).unwrap();
        model.find("holes").unwrap().on_control_changed(&ControlInput::Int(holes)).unwrap();
        prop_assert_eq!(model.calculate(), model.calculate());
    }
}
