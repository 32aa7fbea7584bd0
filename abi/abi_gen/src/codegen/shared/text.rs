/* Text layout helpers shared by the writers */

pub const INDENT: &str = "  ";

/* Prefix every line that has visible content with one indentation level.
   Blank and whitespace-only lines are left untouched so the output never
   carries trailing whitespace. */
pub fn indent(text: &str) -> String {
  text
    .split('\n')
    .map(|line| {
      if line.trim().is_empty() {
        line.to_string()
      } else {
        format!("{}{}", INDENT, line)
      }
    })
    .collect::<Vec<_>>()
    .join("\n")
}
