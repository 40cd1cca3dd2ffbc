use super::*;

#[test]
fn test_map_resolver() {
    let mut vars: MapResolver = [("a", Value::Int(1))].into_iter().collect();
    assert!(vars.is_resolvable("a"));
    assert!(!vars.is_resolvable("b"));
    assert_eq!(vars.resolve("a"), Some(Value::Int(1)));

    vars.assign("b", Value::from("x"));
    vars.insert("c", true);
    assert_eq!(vars.get("b"), Some(&Value::from("x")));
    assert_eq!(vars.get("c"), Some(&Value::Bool(true)));
    assert_eq!(vars.len(), 3);
}

#[test]
fn test_chained_lookup_order() {
    let mut parent = MapResolver::new();
    parent.insert("x", Value::Int(1));
    parent.insert("y", Value::Int(2));

    let mut scope = ChainedResolver::new(&mut parent);
    scope.declare("x", Value::Int(10));
    assert_eq!(scope.resolve("x"), Some(Value::Int(10)));
    assert_eq!(scope.resolve("y"), Some(Value::Int(2)));
    assert_eq!(scope.resolve("z"), None);
    assert!(scope.is_resolvable("y"));
}

#[test]
fn test_chained_assignment_targets() {
    let mut parent = MapResolver::new();
    parent.insert("total", Value::Int(0));

    {
        let mut scope = ChainedResolver::new(&mut parent);
        scope.assign("total", Value::Int(5));
        scope.assign("i", Value::Int(1));
        scope.assign("i", Value::Int(2));
        assert_eq!(scope.local("i"), Some(&Value::Int(2)));
        assert_eq!(scope.local("total"), None);
    }

    assert_eq!(parent.get("total"), Some(&Value::Int(5)));
    assert_eq!(parent.get("i"), None);
}
