//! Property tests: serialize(parse(serialize(i))) keeps every field

use gcodesplit_toolpath::{GcodeParser, Instruction, MotionClass};
use proptest::prelude::*;

fn motion() -> impl Strategy<Value = MotionClass> {
    prop_oneof![
        Just(MotionClass::Rapid),
        Just(MotionClass::Linear),
        Just(MotionClass::ArcCw),
        Just(MotionClass::ArcCcw),
    ]
}

fn coordinate() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(-5000.0f64..5000.0)
}

prop_compose! {
    fn instruction()(
        motion in motion(),
        x in coordinate(),
        y in coordinate(),
        z in coordinate(),
        i in coordinate(),
        j in coordinate(),
        f in prop::option::of(1.0f64..20000.0),
        forced_x in -5000.0f64..5000.0,
        comment in prop::option::of("[a-zA-Z0-9 ]{1,12}"),
    ) -> Instruction {
        let mut ins = Instruction::new(motion);
        ins.x = x.or(Some(forced_x));
        ins.y = y;
        ins.z = z;
        ins.i = i;
        ins.j = j;
        ins.f = f;
        ins.comment = comment.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
        ins
    }
}

proptest! {
    #[test]
    fn serialized_instruction_reparses_to_same_text(ins in instruction()) {
        let text = ins.to_gcode();
        let mut parser = GcodeParser::new();
        let reparsed = parser.parse_line(&text).unwrap();
        prop_assert_eq!(reparsed.to_gcode(), text);
        prop_assert_eq!(reparsed.motion, ins.motion);
        prop_assert_eq!(reparsed.x.is_some(), ins.x.is_some());
        prop_assert_eq!(reparsed.i.is_some(), ins.i.is_some());
        prop_assert_eq!(reparsed.comment, ins.comment);
    }

    #[test]
    fn reparsed_values_match_to_four_places(ins in instruction()) {
        let mut parser = GcodeParser::new();
        let reparsed = parser.parse_line(&ins.to_gcode()).unwrap();
        let pairs = [(ins.x, reparsed.x), (ins.y, reparsed.y), (ins.z, reparsed.z), (ins.f, reparsed.f)];
        for (before, after) in pairs {
            match (before, after) {
                (Some(a), Some(b)) => prop_assert!((a - b).abs() <= 0.00005 + 1e-9),
                (None, None) => {}
                _ => prop_assert!(false, "field presence changed"),
            }
        }
    }
}
