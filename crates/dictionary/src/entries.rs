//! Curated word list

use bangla_dict_core::DictionaryEntry;

pub(crate) const ENTRIES: &[(&str, DictionaryEntry)] = &[
    (
        "hello",
        DictionaryEntry {
            bengali: "হ্যালো / নমস্কার",
            pronunciation: "hæloʊ",
            definition: "A greeting; an expression of welcome or salutation",
            part_of_speech: "interjection",
            examples: &[
                "Hello, how are you today?",
                "She said hello to everyone at the party.",
            ],
        },
    ),
    (
        "book",
        DictionaryEntry {
            bengali: "বই / পুস্তক",
            pronunciation: "bʊk",
            definition: "A written or printed work consisting of pages bound together",
            part_of_speech: "noun",
            examples: &[
                "I love reading a good book before bed.",
                "The library has thousands of books.",
            ],
        },
    ),
    (
        "water",
        DictionaryEntry {
            bengali: "পানি / জল",
            pronunciation: "ˈwɔːtər",
            definition: "A clear, colorless, odorless liquid essential for life",
            part_of_speech: "noun",
            examples: &[
                "Drink plenty of water to stay hydrated.",
                "The water in the lake is crystal clear.",
            ],
        },
    ),
    (
        "food",
        DictionaryEntry {
            bengali: "খাবার / আহার",
            pronunciation: "fuːd",
            definition: "Any nutritious substance consumed to sustain life and growth",
            part_of_speech: "noun",
            examples: &[
                "The food at this restaurant is delicious.",
                "We need to buy food for dinner.",
            ],
        },
    ),
    (
        "home",
        DictionaryEntry {
            bengali: "বাড়ি / ঘর",
            pronunciation: "hoʊm",
            definition: "The place where one lives permanently",
            part_of_speech: "noun",
            examples: &["There's no place like home.", "I'm going home after work."],
        },
    ),
    (
        "love",
        DictionaryEntry {
            bengali: "ভালোবাসা / প্রেম",
            pronunciation: "lʌv",
            definition: "An intense feeling of deep affection",
            part_of_speech: "noun/verb",
            examples: &[
                "I love spending time with my family.",
                "Love conquers all obstacles.",
            ],
        },
    ),
    (
        "friend",
        DictionaryEntry {
            bengali: "বন্ধু / বান্ধব",
            pronunciation: "frend",
            definition:
                "A person whom one knows and with whom one has a bond of mutual affection",
            part_of_speech: "noun",
            examples: &[
                "She is my best friend since childhood.",
                "A true friend is always there for you.",
            ],
        },
    ),
    (
        "school",
        DictionaryEntry {
            bengali: "স্কুল / বিদ্যালয়",
            pronunciation: "skuːl",
            definition: "An institution for educating children",
            part_of_speech: "noun",
            examples: &[
                "Children go to school to learn.",
                "My school has excellent teachers.",
            ],
        },
    ),
    (
        "work",
        DictionaryEntry {
            bengali: "কাজ / শ্রম",
            pronunciation: "wɜːrk",
            definition: "Activity involving mental or physical effort to achieve a purpose",
            part_of_speech: "noun/verb",
            examples: &[
                "I have a lot of work to finish today.",
                "Hard work pays off in the end.",
            ],
        },
    ),
    (
        "happy",
        DictionaryEntry {
            bengali: "খুশি / আনন্দিত",
            pronunciation: "ˈhæpi",
            definition: "Feeling or showing pleasure or contentment",
            part_of_speech: "adjective",
            examples: &[
                "I am happy to see you again.",
                "The children look happy playing in the park.",
            ],
        },
    ),
    (
        "beautiful",
        DictionaryEntry {
            bengali: "সুন্দর / রূপবান",
            pronunciation: "ˈbjuːtɪfəl",
            definition: "Pleasing the senses or mind aesthetically",
            part_of_speech: "adjective",
            examples: &[
                "The sunset is absolutely beautiful.",
                "She has a beautiful voice.",
            ],
        },
    ),
    (
        "time",
        DictionaryEntry {
            bengali: "সময় / কাল",
            pronunciation: "taɪm",
            definition: "The indefinite continued progress of existence",
            part_of_speech: "noun",
            examples: &["Time flies when you're having fun.", "What time is it now?"],
        },
    ),
    (
        "money",
        DictionaryEntry {
            bengali: "টাকা / অর্থ",
            pronunciation: "ˈmʌni",
            definition: "A current medium of exchange in the form of coins and banknotes",
            part_of_speech: "noun",
            examples: &[
                "Money can't buy happiness.",
                "I need to save money for my vacation.",
            ],
        },
    ),
    (
        "family",
        DictionaryEntry {
            bengali: "পরিবার / কুটুম্ব",
            pronunciation: "ˈfæməli",
            definition: "A group consisting of parents and children living together",
            part_of_speech: "noun",
            examples: &[
                "Family is the most important thing in life.",
                "We're having a family dinner tonight.",
            ],
        },
    ),
    (
        "health",
        DictionaryEntry {
            bengali: "স্বাস্থ্য / আরোগ্য",
            pronunciation: "helθ",
            definition: "The state of being free from illness or injury",
            part_of_speech: "noun",
            examples: &[
                "Good health is more valuable than wealth.",
                "Regular exercise improves your health.",
            ],
        },
    ),
];
