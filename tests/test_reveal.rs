use sketchly_be::games::sketch::reveal::{
    masked_word, reveal_interval, special_char_indices, special_chars,
};

#[test]
fn test_special_char_indices() {
    assert_eq!(special_char_indices("apple"), Vec::<usize>::new());
    assert_eq!(special_char_indices("ice cream"), vec![3]);
    assert_eq!(special_char_indices("t-shirt"), vec![1]);
    assert_eq!(special_char_indices("merry-go-round"), vec![5, 8]);
    assert_eq!(special_char_indices("aurora borealis"), vec![6]);
}

#[test]
fn test_special_chars_carry_the_character() {
    let chars = special_chars("t-shirt");
    assert_eq!(chars.len(), 1);
    assert_eq!(chars[0].index, 1);
    assert_eq!(chars[0].char, '-');

    let chars = special_chars("hot dog");
    assert_eq!(chars[0].index, 3);
    assert_eq!(chars[0].char, ' ');
}

#[test]
fn test_masked_word_hides_unrevealed() {
    assert_eq!(masked_word("dog", &[]), vec!["_", "_", "_"]);
    assert_eq!(masked_word("dog", &[0]), vec!["d", "_", "_"]);
    assert_eq!(masked_word("dog", &[0, 1, 2]), vec!["d", "o", "g"]);
}

#[test]
fn test_masked_word_with_presets() {
    let revealed = special_char_indices("ice cream");
    assert_eq!(
        masked_word("ice cream", &revealed),
        vec!["_", "_", "_", " ", "_", "_", "_", "_", "_"]
    );
}

#[test]
fn test_masked_word_ignores_out_of_range_indices() {
    assert_eq!(masked_word("dog", &[7]), vec!["_", "_", "_"]);
}

#[test]
fn test_reveal_interval_floor_with_minimum() {
    assert_eq!(reveal_interval(5), 12);
    assert_eq!(reveal_interval(6), 10);
    assert_eq!(reveal_interval(7), 8);
    assert_eq!(reveal_interval(60), 1);
    // Words longer than a minute still tick every second.
    assert_eq!(reveal_interval(61), 1);
    assert_eq!(reveal_interval(120), 1);
    assert_eq!(reveal_interval(0), 1);
}
