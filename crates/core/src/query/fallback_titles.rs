//! Built-in titles for popular identifiers, used when metadata lookups fail.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::normalize::normalize_without_year;

/// `(identifier, "Title Year")`. Series carry no year.
const ENTRIES: &[(&str, &str)] = &[
    // John Wick
    ("tt2911666", "John Wick 2014"),
    ("tt4425200", "John Wick Chapter 2 2017"),
    ("tt6146586", "John Wick Chapter 3 Parabellum 2019"),
    ("tt10366206", "John Wick Chapter 4 2023"),
    // action
    ("tt0468569", "The Dark Knight 2008"),
    ("tt1375666", "Inception 2010"),
    ("tt0137523", "Fight Club 1999"),
    ("tt0109830", "Forrest Gump 1994"),
    ("tt0111161", "The Shawshank Redemption 1994"),
    ("tt0816692", "Interstellar 2014"),
    ("tt1853728", "Django Unchained 2012"),
    ("tt0103064", "Terminator 2 Judgment Day 1991"),
    ("tt0133093", "The Matrix 1999"),
    ("tt0120586", "American History X 1998"),
    // Marvel
    ("tt4154756", "Avengers Endgame 2019"),
    ("tt4154664", "Captain Marvel 2019"),
    ("tt0371746", "Iron Man 2008"),
    ("tt1228705", "Iron Man 2 2010"),
    ("tt0800080", "The Incredible Hulk 2008"),
    ("tt0458339", "Captain America The First Avenger 2011"),
    ("tt1843866", "Captain America The Winter Soldier 2014"),
    ("tt3498820", "Captain America Civil War 2016"),
    ("tt0800369", "Thor 2011"),
    ("tt1981115", "Thor The Dark World 2013"),
    ("tt3501632", "Thor Ragnarok 2017"),
    ("tt10648342", "Thor Love and Thunder 2022"),
    ("tt0848228", "The Avengers 2012"),
    ("tt2395427", "Avengers Age of Ultron 2015"),
    ("tt2015381", "Guardians of the Galaxy 2014"),
    ("tt3896198", "Guardians of the Galaxy Vol 2 2017"),
    ("tt0478970", "Ant-Man 2015"),
    ("tt5095030", "Ant-Man and the Wasp 2018"),
    ("tt2250912", "Spider-Man Homecoming 2017"),
    ("tt6320628", "Spider-Man Far From Home 2019"),
    ("tt10872600", "Spider Man No Way Home 2021"),
    ("tt3480822", "Black Panther 2018"),
    ("tt9376612", "Shang Chi and the Legend of the Ten Rings 2021"),
    ("tt9114286", "Black Widow 2021"),
    ("tt9032400", "Eternals 2021"),
    ("tt9419884", "Doctor Strange in the Multiverse of Madness 2022"),
    ("tt1877830", "X-Men Days of Future Past 2014"),
    ("tt1431045", "Deadpool 2016"),
    ("tt5463162", "Deadpool 2 2018"),
    ("tt6263850", "Deadpool and Wolverine 2024"),
    // DC
    ("tt0372784", "Batman Begins 2005"),
    ("tt1345836", "The Dark Knight Rises 2012"),
    ("tt0451279", "Wonder Woman 2017"),
    ("tt7126948", "Wonder Woman 1984 2020"),
    ("tt0974015", "Justice League 2017"),
    ("tt12361974", "Zack Snyder Justice League 2021"),
    ("tt0770828", "Man of Steel 2013"),
    ("tt2975590", "Batman v Superman Dawn of Justice 2016"),
    ("tt1386697", "Suicide Squad 2016"),
    ("tt6334354", "The Suicide Squad 2021"),
    // Fast & Furious
    ("tt0232500", "The Fast and the Furious 2001"),
    ("tt0322259", "2 Fast 2 Furious 2003"),
    ("tt0463985", "The Fast and the Furious Tokyo Drift 2006"),
    ("tt1013752", "Fast and Furious 2009"),
    ("tt1905041", "Fast and Furious 6 2013"),
    ("tt2820852", "Furious 7 2015"),
    ("tt4630562", "The Fate of the Furious 2017"),
    ("tt6806448", "Fast and Furious Presents Hobbs and Shaw 2019"),
    ("tt5433140", "F9 The Fast Saga 2021"),
    // horror, drama
    ("tt1396484", "It 2017"),
    ("tt7349950", "It Chapter Two 2019"),
    ("tt0816711", "World War Z 2013"),
    ("tt0448115", "Shutter Island 2010"),
    ("tt0758758", "Into the Wild 2007"),
    ("tt1205489", "Gran Torino 2008"),
    // sci-fi
    ("tt0083658", "Blade Runner 1982"),
    ("tt0481499", "Blade Runner 2049 2017"),
    ("tt0076759", "Star Wars A New Hope 1977"),
    ("tt0080684", "Star Wars The Empire Strikes Back 1980"),
    ("tt0086190", "Star Wars Return of the Jedi 1983"),
    ("tt2488496", "Star Wars The Force Awakens 2015"),
    ("tt2527336", "Star Wars The Last Jedi 2017"),
    ("tt2527338", "Star Wars The Rise of Skywalker 2019"),
    ("tt3748528", "Rogue One A Star Wars Story 2016"),
    // recent
    ("tt1745960", "Top Gun Maverick 2022"),
    ("tt6751668", "Parasite 2019"),
    ("tt7286456", "Joker 2019"),
    ("tt6264654", "Free Guy 2021"),
    // classics
    ("tt0110912", "Pulp Fiction 1994"),
    ("tt0108052", "Schindlers List 1993"),
    ("tt0120737", "The Lord of the Rings The Fellowship of the Ring 2001"),
    ("tt0167261", "The Lord of the Rings The Two Towers 2002"),
    ("tt0167260", "The Lord of the Rings The Return of the King 2003"),
    ("tt0068646", "The Godfather 1972"),
    ("tt0071562", "The Godfather Part II 1974"),
    ("tt0099685", "Goodfellas 1990"),
    ("tt0114369", "Se7en 1995"),
    ("tt0102926", "The Silence of the Lambs 1991"),
    ("tt0110413", "Léon The Professional 1994"),
    ("tt0120815", "Saving Private Ryan 1998"),
    ("tt0993846", "The Wolf of Wall Street 2013"),
    ("tt1049413", "Up 2009"),
    ("tt0317248", "City of God 2002"),
    ("tt0118799", "Life Is Beautiful 1997"),
    ("tt0245429", "Spirited Away 2001"),
    // Mission Impossible
    ("tt0117060", "Mission Impossible 1996"),
    ("tt0120755", "Mission Impossible II 2000"),
    ("tt0317919", "Mission Impossible III 2006"),
    ("tt1229238", "Mission Impossible Ghost Protocol 2011"),
    ("tt2381249", "Mission Impossible Rogue Nation 2015"),
    ("tt4912910", "Mission Impossible Fallout 2018"),
    ("tt9603212", "Mission Impossible Dead Reckoning Part One 2023"),
    // Bond
    ("tt0381061", "Casino Royale 2006"),
    ("tt0830515", "Quantum of Solace 2008"),
    ("tt2379713", "Skyfall 2012"),
    ("tt1074638", "Spectre 2015"),
    ("tt2382320", "No Time to Die 2021"),
    // series
    ("tt0944947", "Game of Thrones"),
    ("tt0903747", "Breaking Bad"),
    ("tt2356777", "True Detective"),
    ("tt1475582", "Sherlock"),
    ("tt2861424", "Rick and Morty"),
    ("tt0436992", "Doctor Who 2005"),
    ("tt1844624", "American Horror Story"),
    ("tt2085059", "Black Mirror"),
    ("tt5753856", "Dark"),
    ("tt4574334", "Stranger Things"),
    ("tt1190634", "The Boys"),
    ("tt6468322", "Money Heist"),
    ("tt5420376", "Squid Game"),
    ("tt1439629", "Community"),
    ("tt0898266", "The Big Bang Theory"),
    ("tt0386676", "The Office"),
    ("tt0108778", "Friends"),
    ("tt7366338", "Chernobyl"),
    ("tt1596343", "Suits"),
    ("tt1632701", "Suits"),
    ("tt4052886", "Lucifer"),
    ("tt1442437", "Modern Family"),
    ("tt1845307", "Nashville"),
    ("tt6741278", "Anne with an E"),
];

/// Collected into a map, so a repeated identifier keeps its last entry.
static TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ENTRIES.iter().copied().collect());

/// A fallback title split into its search title and year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackTitle {
    pub title: String,
    pub year: Option<u32>,
}

/// Look up an identifier in the built-in table.
pub fn lookup_fallback_title(external_id: &str) -> Option<FallbackTitle> {
    TABLE.get(external_id).map(|raw| {
        let (title, year) = normalize_without_year(raw);
        FallbackTitle { title, year }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_movie_splits_year() {
        let entry = lookup_fallback_title("tt2911666").unwrap();
        assert_eq!(entry.title, "John Wick");
        assert_eq!(entry.year, Some(2014));

        let entry = lookup_fallback_title("tt0481499").unwrap();
        assert_eq!(entry.title, "Blade Runner 2049");
        assert_eq!(entry.year, Some(2017));
    }

    #[test]
    fn test_lookup_series_without_year() {
        let entry = lookup_fallback_title("tt0944947").unwrap();
        assert_eq!(entry.title, "Game of Thrones");
        assert_eq!(entry.year, None);
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup_fallback_title("tt0000001").is_none());
        assert!(lookup_fallback_title("").is_none());
    }

    #[test]
    fn test_collect_keeps_last_entry() {
        let map: HashMap<&str, &str> = [("tt1", "First"), ("tt1", "Second")].into_iter().collect();
        assert_eq!(map.get("tt1"), Some(&"Second"));
    }
}
