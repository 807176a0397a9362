use octant_field::app::Field;
use octant_field::dimension::Dimensions;
use octant_field::node::NodeKey;
use octant_field::session::FileSession;
use octant_field::session::MemorySession;
use octant_field::session::SessionStore;
use octant_field::svg::Scene;
use octant_field::tower::Tower;

#[test]
fn reload_rebuilds_same_field() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("reload.json");

    let first = {
        let mut field = Field::new(FileSession::open(&path)?);
        field.apply("13", "6")?;
        field.tower().cloned()
    };

    let field = Field::restore(FileSession::open(&path)?);

    let (Some(first), Some(second)) = (first, field.tower()) else {
        panic!("both fields should have a tower");
    };

    assert_eq!(second.dimensions(), Dimensions::new(13, 6)?);
    assert_eq!(first.levels(), second.levels());

    Ok(())
}

#[test]
fn invalid_apply_keeps_session() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("invalid.json");

    {
        let mut field = Field::new(FileSession::open(&path)?);
        field.apply("7", "7")?;

        assert!(field.apply("7", "abc").is_err());
        assert!(field.apply("0", "7").is_err());
    }

    let store = FileSession::open(&path)?;

    assert_eq!(store.get("x-dimension").as_deref(), Some("7"));
    assert_eq!(store.get("y-dimension").as_deref(), Some("7"));

    Ok(())
}

#[test]
fn stepping_to_root_from_applied_field() -> anyhow::Result<()> {
    let mut field = Field::new(MemorySession::new());
    field.apply("100", "37")?;

    let mut steps = 0;
    while field.next_step().is_some() {
        steps += 1;
    }

    let Some(tower) = field.tower() else {
        panic!("field should have a tower");
    };

    // 100 needs 7 halvings to reach 1, and apply already built the first
    assert_eq!(steps, 6);
    assert_eq!(tower.top_index(), 7);

    let root = tower.node(NodeKey::new(7, 0, 0)).expect("root exists");
    assert_eq!((root.x_span, root.y_span), (100, 37));

    Ok(())
}

#[test]
fn svg_of_applied_field() -> anyhow::Result<()> {
    let mut field = Field::new(MemorySession::new());
    field.apply("3", "2")?;

    let Some(tower) = field.tower() else {
        panic!("field should have a tower");
    };

    insta::assert_snapshot!(Scene::from_tower(tower).to_svg(), @r#"
    <svg xmlns="http://www.w3.org/2000/svg" viewBox="0, 0, 3, 2" width="500" height="333.3333333333333">
      <g id="n-1-0-0">
        <rect id="n-0-0-0" x="0.125" y="0.125" width="0.75" height="0.75" fill="black"/>
        <rect id="n-0-0-1" x="0.125" y="1.125" width="0.75" height="0.75" fill="black"/>
        <rect id="n-0-1-0" x="1.125" y="0.125" width="0.75" height="0.75" fill="black"/>
        <rect id="n-0-1-1" x="1.125" y="1.125" width="0.75" height="0.75" fill="black"/>
      </g>
      <g id="n-1-1-0">
        <rect id="n-0-2-0" x="2.125" y="0.125" width="0.75" height="0.75" fill="black"/>
        <rect id="n-0-2-1" x="2.125" y="1.125" width="0.75" height="0.75" fill="black"/>
      </g>
    </svg>
    "#);

    Ok(())
}

#[test]
fn full_svg_nests_every_level() {
    let tower = Tower::build_full(Dimensions::new(4, 4).unwrap());
    let svg = Scene::from_tower(&tower).to_svg();

    assert_eq!(svg.matches("<g ").count(), 5);
    assert_eq!(svg.matches("<rect ").count(), 16);

    // the root group opens first and closes last
    let lines: Vec<&str> = svg.lines().collect();
    assert_eq!(lines[1], r#"  <g id="n-2-0-0">"#);
    assert_eq!(lines[lines.len() - 2], "  </g>");
}
