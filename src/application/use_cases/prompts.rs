//! Prompt templates for every model call the pipeline makes.
//!
//! The catalog and the customers are Russian-speaking, so the instructions
//! are written in Russian as well.

/// Converts the raw price list into a JSON array of `{name, price}` records.
pub fn catalog_extraction_prompt(raw_source: &str) -> String {
    format!(
        "Ты — ассистент, который аккуратно переносит данные из прайс-листа в структурированный вид.\n\
         Преобразуй текст ниже в JSON-массив. Каждая строка текста описывает один товар.\n\
         Каждый элемент массива — объект с полями \"name\" (строка) и \"price\" (целое число).\n\
         \n\
         Правила:\n\
         - Цена — только число, без \"руб.\", пробелов и других символов.\n\
         - Название — всё, что стоит в строке перед ценой.\n\
         - Строки без цены пропускай.\n\
         - Ответ — только JSON-массив, без пояснений до и после него.\n\
         \n\
         Текст прайс-листа:\n\
         ---\n\
         {raw_source}\n\
         ---"
    )
}

/// Asks for the salient search keywords of a customer request.
pub fn keyword_extraction_prompt(query: &str) -> String {
    format!(
        "Выдели из запроса клиента ключевые слова для поиска товаров на складе.\n\
         \n\
         Правила:\n\
         1. Оставляй только существительные, прилагательные и технические обозначения: артикулы, размеры, марки.\n\
         2. Отбрасывай количества (\"10 штук\", \"12 метров\"), единицы измерения (\"мм\"), предлоги, союзы и вежливые фразы.\n\
         3. Исправляй очевидные опечатки (\"крыжка\" → \"крышка\").\n\
         4. Все слова — в нижнем регистре.\n\
         5. Ответ — только JSON-объект с полем \"keywords\", без текста вокруг.\n\
         \n\
         Пример.\n\
         Запрос: \"Лоток перфорированый 100х100, 12 метров, и 10 гаек М10\"\n\
         Ответ:\n\
         ```json\n\
         {{\"keywords\": [\"лоток\", \"перфорированный\", \"100х100\", \"гайка\", \"м10\"]}}\n\
         ```\n\
         \n\
         Запрос клиента:\n\
         \"{query}\"\n\
         Ответ:"
    )
}

/// Stage one: a free-text bill of materials covering the customer's goal.
pub fn planning_prompt(candidates_json: &str, query: &str) -> String {
    format!(
        "Ты — инженер-комплектовщик. Клиент описал, что ему нужно; твоя задача — собрать полный перечень позиций.\n\
         \n\
         Как собирать:\n\
         - Если клиент просит конкретную деталь (\"Крышка 200 мм\"), в перечне только эта деталь.\n\
         - Если клиенту нужен монтаж или сборка (\"комплект для монтажа короба 200х200\"), включи всё, без чего работу не сделать: сам короб, крышку, винты, гайки и прочий крепёж.\n\
         - Используй только товары из списка ниже; других позиций не придумывай.\n\
         \n\
         Формат ответа:\n\
         - Только маркированный список строк вида \"- Название, Количество\".\n\
         - Без заголовков, комментариев и пустых строк.\n\
         \n\
         Доступные товары (JSON):\n\
         {candidates_json}\n\
         \n\
         Запрос клиента:\n\
         \"{query}\"\n\
         \n\
         Перечень:"
    )
}

/// Stage two: map the plan onto catalog ids and quantities.
pub fn structuring_prompt(plan: &str, candidates_json: &str) -> String {
    format!(
        "Преобразуй перечень комплектации в JSON, сопоставив каждую позицию с товаром из списка.\n\
         \n\
         Правила:\n\
         1. Бери только позиции, которые есть в перечне.\n\
         2. Для каждой позиции выбери товар из списка, наиболее точно совпадающий по описанию, и укажи его \"id\".\n\
         3. Количество — целое положительное число из перечня.\n\
         4. Ответ — только JSON-объект указанного формата, без комментариев.\n\
         \n\
         Формат ответа:\n\
         ```json\n\
         {{\"found_items\": [{{\"id\": 15, \"quantity\": 10}}]}}\n\
         ```\n\
         \n\
         Перечень комплектации:\n\
         {plan}\n\
         \n\
         Список товаров (JSON):\n\
         {candidates_json}"
    )
}
